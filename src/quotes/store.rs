

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;

use super::data::{self, Quote};
use crate::core::error::{QuotesError, Result};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InitStatus {
    Success,
    Skipped,
}


/// Body of `POST /quotes/init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitOutcome {
    pub status: InitStatus,
    pub message: String,
    pub count: usize,
}

impl InitOutcome {
    pub fn loaded(count: usize) -> Self {
        Self {
            status: InitStatus::Success,
            message: "Quotes loaded successfully".to_string(),
            count,
        }
    }

    pub fn skipped(message: impl Into<String>, count: usize) -> Self {
        Self {
            status: InitStatus::Skipped,
            message: message.into(),
            count,
        }
    }
}


/// Storage behind the plain (non-semantic) quote endpoints.
#[async_trait]
pub trait QuoteStore: Send + Sync {

    async fn random(&self) -> Result<Option<Quote>>;


    async fn all(&self) -> Result<Vec<Quote>>;

    /// Loads the dataset when the store is empty or `force` is set.
    async fn initialize(&self, force: bool) -> Result<InitOutcome>;

    /// Removes every quote, returning how many were deleted.
    async fn clean(&self) -> Result<u64>;


    async fn health(&self) -> Result<()>;


    fn backend(&self) -> &'static str;
}


#[derive(Debug, Default, Clone)]
pub struct InMemoryQuoteStore;

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuoteStore for InMemoryQuoteStore {
    async fn random(&self) -> Result<Option<Quote>> {
        Ok(Some(data::random_quote()))
    }

    async fn all(&self) -> Result<Vec<Quote>> {
        Ok(data::all_quotes())
    }

    async fn initialize(&self, _force: bool) -> Result<InitOutcome> {
        info!("In-memory quotes are always loaded");
        Ok(InitOutcome::skipped("Quotes are served from memory", data::QUOTE_COUNT))
    }

    async fn clean(&self) -> Result<u64> {
        Err(QuotesError::Validation(
            "In-memory quotes are read-only".to_string(),
        ))
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryQuoteStore::new();
        tokio_test::block_on(async {
            assert_eq!(store.all().await.unwrap().len(), 24);
            assert!(store.random().await.unwrap().is_some());
            assert!(store.health().await.is_ok());
            assert_eq!(store.backend(), "memory");
        });
    }

    #[test]
    fn test_in_memory_store_is_read_only() {
        let store = InMemoryQuoteStore::new();
        let result = tokio_test::block_on(store.clean());
        assert!(matches!(result, Err(QuotesError::Validation(_))));

        let outcome = tokio_test::block_on(store.initialize(true)).unwrap();
        assert_eq!(outcome.status, InitStatus::Skipped);
        assert_eq!(outcome.count, 24);
    }

    #[test]
    fn test_init_outcome_json() {
        let json = serde_json::to_value(InitOutcome::loaded(24)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Quotes loaded successfully");
        assert_eq!(json["count"], 24);
    }
}
