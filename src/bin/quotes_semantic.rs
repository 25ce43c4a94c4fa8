

use cf_quotes::platform::ServiceBindings;
use cf_quotes::{QuotesConfig, SemanticRuntime, api};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,cf_quotes=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = QuotesConfig::from_env()?;
    let bindings = ServiceBindings::from_env()?;

    info!("Semantic Quotes Demo - Stage 3: semantic search with vector embeddings");
    info!("   🤖 Embedding service: {}", config.embedding_service_name);
    info!("   📊 Vector DB service: {}", config.vector_db_service_name);

    let addr = config.bind_addr();
    let runtime = Arc::new(SemanticRuntime::from_platform(config, bindings));
    runtime.start().await;

    api::serve(api::semantic_router(runtime), &addr).await?;
    Ok(())
}
