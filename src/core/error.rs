

use thiserror::Error;

use crate::llm::embeddings::EmbeddingError;
use crate::platform::BindingError;
use crate::search::SimilarityError;


#[derive(Error, Debug)]
pub enum QuotesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service binding error: {0}")]
    Binding(#[from] BindingError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Embedding generation error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for QuotesError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}


pub type Result<T> = std::result::Result<T, QuotesError>;
