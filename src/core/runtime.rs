

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

use super::config::QuotesConfig;
use super::error::{QuotesError, Result};
use crate::db::{DatabasePool, PgVectorStore};
use crate::llm::embeddings::{Embedder, GenAiEmbeddings};
use crate::platform::{ServiceBindings, resolve_genai, resolve_postgres};
use crate::quotes::InitStatus;
use crate::search::SemanticQuotes;


/// Builds a ready-to-use [`SemanticQuotes`] from whatever backs it.
#[async_trait]
pub trait ServiceConnector: Send + Sync {
    async fn connect(&self) -> Result<SemanticQuotes>;
}


/// Connects to the bound embedding service and PostgreSQL instance.
pub struct PlatformConnector {
    config: QuotesConfig,
    bindings: ServiceBindings,
}

impl PlatformConnector {
    pub fn new(config: QuotesConfig, bindings: ServiceBindings) -> Self {
        Self { config, bindings }
    }
}

#[async_trait]
impl ServiceConnector for PlatformConnector {
    async fn connect(&self) -> Result<SemanticQuotes> {
        let genai = resolve_genai(&self.bindings, &self.config)?;
        info!("Initializing embedding service: {}", genai.name);
        let embedder = GenAiEmbeddings::connect(
            &genai,
            self.config.embedding_model.clone(),
            self.config.timeout(),
            self.config.accept_invalid_certs,
        )
        .await?;
        info!("✅ Embedding service initialized (model {})", embedder.model());

        let postgres = resolve_postgres(&self.bindings, &self.config)?;
        info!("Initializing vector store: {}", postgres.name);
        let pool = DatabasePool::connect(
            &postgres,
            self.config.db_max_connections,
            self.config.timeout(),
        )
        .await?;
        let store = PgVectorStore::new(pool, self.config.collection_name.clone()).await?;
        info!("✅ Vector store initialized");

        Ok(SemanticQuotes::new(Arc::new(embedder), Arc::new(store)))
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: String,
    pub services: BTreeMap<String, String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}


/// Lazily connected semantic backend shared by the HTTP and MCP surfaces.
///
/// A failed connection is not cached: the next call to [`Self::service`]
/// tries again.
pub struct SemanticRuntime {
    config: QuotesConfig,
    bindings: ServiceBindings,
    connector: Arc<dyn ServiceConnector>,
    service: OnceCell<Arc<SemanticQuotes>>,
}

impl SemanticRuntime {
    pub fn new(
        config: QuotesConfig,
        bindings: ServiceBindings,
        connector: Arc<dyn ServiceConnector>,
    ) -> Self {
        Self {
            config,
            bindings,
            connector,
            service: OnceCell::new(),
        }
    }


    pub fn from_platform(config: QuotesConfig, bindings: ServiceBindings) -> Self {
        let connector = Arc::new(PlatformConnector::new(config.clone(), bindings.clone()));
        Self::new(config, bindings, connector)
    }


    pub fn config(&self) -> &QuotesConfig {
        &self.config
    }


    pub fn bindings(&self) -> &ServiceBindings {
        &self.bindings
    }

    /// Connects once and loads the dataset into an empty store.
    pub async fn service(&self) -> Result<Arc<SemanticQuotes>> {
        self.service
            .get_or_try_init(|| async {
                let service = self.connector.connect().await?;
                let outcome = service.initialize(false).await?;
                match outcome.status {
                    InitStatus::Success => info!("✅ {} quotes loaded into vector store", outcome.count),
                    InitStatus::Skipped => info!("✅ Quotes already loaded, skipping initialization"),
                }
                Ok::<_, QuotesError>(Arc::new(service))
            })
            .await
            .cloned()
            .map_err(|e| match e {
                QuotesError::ServiceUnavailable(_) => e,
                other => QuotesError::ServiceUnavailable(other.to_string()),
            })
    }


    pub fn ready(&self) -> Option<Arc<SemanticQuotes>> {
        self.service.get().cloned()
    }

    /// Startup attempt; failure is logged and retried on the next request.
    pub async fn start(&self) -> bool {
        match self.service().await {
            Ok(_) => {
                info!("Services initialized - ready to serve requests");
                true
            }
            Err(e) => {
                error!("❌ Failed to initialize services during startup: {}", e);
                warn!("Server will start; services are retried on the next request");
                false
            }
        }
    }

    /// Binding and initialization state of every backing service.
    ///
    /// Never connects; a pending retry waits for the next API request.
    pub async fn health(&self) -> HealthReport {
        let mut healthy = true;
        let mut services = BTreeMap::new();

        let embedding = match resolve_genai(&self.bindings, &self.config) {
            Ok(_) => "ok".to_string(),
            Err(e) => {
                warn!("Embedding service check failed: {}", e);
                healthy = false;
                format!("error: {}", e)
            }
        };
        services.insert("embedding".to_string(), embedding);

        let database = match resolve_postgres(&self.bindings, &self.config) {
            Ok(_) => "ok".to_string(),
            Err(e) => {
                warn!("Database service check failed: {}", e);
                healthy = false;
                format!("error: {}", e)
            }
        };
        services.insert("database".to_string(), database);

        let initialized = self.ready().is_some();
        let state = if initialized { "initialized" } else { "not initialized" };
        services.insert("vectorstore".to_string(), state.to_string());
        services.insert("embeddings".to_string(), state.to_string());
        healthy &= initialized;

        HealthReport {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            services,
        }
    }
}
