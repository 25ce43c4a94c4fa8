

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::platform::GenAiBinding;


#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty text")]
    EmptyText,

    #[error("No config_url in credentials of service '{0}'")]
    MissingConfigUrl(String),

    #[error("No models available from embedding service '{0}'")]
    NoModels(String),
}


#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisedModel {
    pub name: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

#[derive(Deserialize)]
struct EndpointConfig {
    #[serde(default, rename = "advertisedModels")]
    advertised_models: Vec<AdvertisedModel>,
}


/// Turns text into a fixed-length vector.
#[async_trait]
pub trait Embedder: Send + Sync {

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// One request per text, in order.
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            embeddings.push(self.embed(text).await?);
            debug!("Embedded document {}/{}", i + 1, texts.len());
        }
        Ok(embeddings)
    }

    fn model(&self) -> &str;
}


/// OpenAI-compatible embeddings endpoint of a bound GenAI service.
pub struct GenAiEmbeddings {
    client: Client,
    embeddings_url: String,
    api_key: String,
    model: String,
}

impl GenAiEmbeddings {

    pub fn http_client(timeout: Duration, accept_invalid_certs: bool) -> Result<Client, EmbeddingError> {
        Ok(Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?)
    }


    pub fn with_model(client: Client, binding: &GenAiBinding, model: impl Into<String>) -> Self {
        let model = model.into();
        let embeddings_url = format!("{}/openai/v1/embeddings", binding.api_base);

        info!("GenAiEmbeddings initialized: service={}, model={}, url={}", binding.name, model, embeddings_url);

        Self {
            client,
            embeddings_url,
            api_key: binding.api_key().to_string(),
            model,
        }
    }

    /// Uses `model` when given, otherwise asks the service which models it advertises.
    pub async fn connect(
        binding: &GenAiBinding,
        model: Option<String>,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, EmbeddingError> {
        let client = Self::http_client(timeout, accept_invalid_certs)?;

        let model = match model {
            Some(model) => model,
            None => {
                let models = Self::list_models(&client, binding).await?;
                pick_model(&models).ok_or_else(|| EmbeddingError::NoModels(binding.name.clone()))?
            }
        };

        Ok(Self::with_model(client, binding, model))
    }


    pub async fn list_models(
        client: &Client,
        binding: &GenAiBinding,
    ) -> Result<Vec<AdvertisedModel>, EmbeddingError> {
        let config_url = binding
            .config_url
            .as_ref()
            .ok_or_else(|| EmbeddingError::MissingConfigUrl(binding.name.clone()))?;

        let config = client
            .get(config_url)
            .bearer_auth(binding.api_key())
            .send()
            .await?
            .error_for_status()?
            .json::<EndpointConfig>()
            .await?;

        debug!("Service {} advertises {} model(s)", binding.name, config.advertised_models.len());
        Ok(config.advertised_models)
    }
}

#[async_trait]
impl Embedder for GenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyText);
        }

        debug!("Generating embedding for: {}", crate::safe_truncate_ellipsis(text, 50));

        let response = self
            .client
            .post(&self.embeddings_url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await?
            .error_for_status()?
            .json::<EmbeddingResponse>()
            .await?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InvalidResponse("No embedding data in API response".to_string()))?;

        debug!("Generated embedding (dimensions: {})", embedding.len());
        Ok(embedding)
    }

    fn model(&self) -> &str {
        &self.model
    }
}


/// First advertised model.
pub fn pick_model(models: &[AdvertisedModel]) -> Option<String> {
    models.first().map(|m| m.name.clone())
}
