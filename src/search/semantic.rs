

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::ranking::{Document, ScoredResult, rank_by_similarity};
use super::similarity::{SimilarityError, cosine_similarity};
use super::vector_store::VectorStore;
use crate::core::error::{QuotesError, Result};
use crate::llm::embeddings::Embedder;
use crate::quotes::{InitOutcome, Quote, all_quotes};


/// Word pairs compared by `GET /words`.
pub const DEFAULT_WORD_PAIRS: [(&str, &str); 9] = [
    ("man", "man"),
    ("man", "woman"),
    ("man", "dirt"),
    ("king", "queen"),
    ("queen", "reine"),
    ("queen", "ملكة"),
    ("banana", "car"),
    ("happy", "joyful"),
    ("happy", "sad"),
];


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSimilarity {
    pub word1: String,
    pub word2: String,
    pub similarity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}


/// Semantic search over the quotes dataset.
///
/// Holds no global state: the embedding provider and the vector store are
/// handed in by the caller and shared through `Arc`.
pub struct SemanticQuotes {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl SemanticQuotes {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }


    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }


    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Top `k` quotes for `topic`, best first.
    pub async fn search(&self, topic: &str, k: usize) -> Result<Vec<ScoredResult>> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(QuotesError::Validation("Topic cannot be empty".to_string()));
        }

        info!("Searching quotes for topic '{}' (k={})", crate::safe_truncate_ellipsis(topic, 50), k);

        if k == 0 {
            return Err(SimilarityError::InvalidArgument(
                "limit must be at least 1, got 0".to_string(),
            )
            .into());
        }

        let corpus = self.store.entries().await?;
        if corpus.is_empty() {
            warn!("Vector store is empty, nothing to search");
            return Ok(Vec::new());
        }

        let query = self.embedder.embed(topic).await?;
        let limit = k.min(corpus.len());
        let results = rank_by_similarity(&query, &corpus, Some(limit))?;

        debug!("Search returned {} results", results.len());
        Ok(results)
    }


    pub async fn all(&self) -> Result<Vec<Quote>> {
        Ok(self
            .store
            .documents()
            .await?
            .into_iter()
            .map(Quote::from)
            .collect())
    }


    pub async fn random(&self) -> Result<Quote> {
        use rand::seq::SliceRandom;

        let documents = self.store.documents().await?;
        documents
            .choose(&mut rand::thread_rng())
            .cloned()
            .map(Quote::from)
            .ok_or_else(|| QuotesError::NotFound("No quotes found".to_string()))
    }


    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.store.count().await? == 0)
    }

    /// Embeds and stores the dataset when the store is empty or `force` is set.
    pub async fn initialize(&self, force: bool) -> Result<InitOutcome> {
        let existing = self.store.count().await?;

        if existing > 0 && !force {
            info!("Vector store already holds {} quotes, skipping load", existing);
            return Ok(InitOutcome::skipped("Quotes already loaded", 0));
        }

        let documents: Vec<Document> = all_quotes().iter().map(Quote::to_document).collect();
        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();

        info!("Generating embeddings for {} quotes with model {}", texts.len(), self.embedder.model());
        let embeddings = self.embedder.embed_documents(&texts).await?;
        let entries = documents.into_iter().zip(embeddings).collect();

        // Existing entries are only dropped once every embedding is in hand.
        let added = if existing > 0 {
            let (removed, added) = self.store.replace(entries).await?;
            info!("Force reload: replaced {} existing entries", removed);
            added
        } else {
            self.store.add(entries).await?
        };

        info!("Loaded {} quotes into the {} vector store", added, self.store.backend());
        Ok(InitOutcome::loaded(added))
    }


    pub async fn clean(&self) -> Result<u64> {
        let removed = self.store.clear().await?;
        info!("Removed {} entries from the vector store", removed);
        Ok(removed)
    }

    /// Cosine similarity between the embeddings of two words.
    pub async fn compare_words(&self, word1: &str, word2: &str) -> Result<WordSimilarity> {
        let (word1, word2) = (word1.trim(), word2.trim());
        if word1.is_empty() || word2.is_empty() {
            return Err(QuotesError::Validation("Both words must be non-empty".to_string()));
        }

        let a = self.embedder.embed(word1).await?;
        let b = self.embedder.embed(word2).await?;

        Ok(WordSimilarity {
            word1: word1.to_string(),
            word2: word2.to_string(),
            similarity: cosine_similarity(&a, &b)?,
            error: None,
        })
    }

    /// Compares each pair; a failing pair scores 0.0 and carries its error.
    pub async fn word_similarity(&self, pairs: &[(&str, &str)]) -> Vec<WordSimilarity> {
        info!("Computing word similarity for {} pairs", pairs.len());

        let mut results = Vec::with_capacity(pairs.len());
        for &(word1, word2) in pairs {
            match self.compare_words(word1, word2).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to compare '{}' and '{}': {}", word1, word2, e);
                    results.push(WordSimilarity {
                        word1: word1.to_string(),
                        word2: word2.to_string(),
                        similarity: 0.0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        results
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm::embeddings::EmbeddingError;
    use crate::search::vector_store::MemoryVectorStore;
    use async_trait::async_trait;

    /// Letter-frequency vectors; fails on the word "fail".
    pub(crate) struct LetterEmbedder;

    #[async_trait]
    impl Embedder for LetterEmbedder {
        async fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, EmbeddingError> {
            if text.trim().is_empty() {
                return Err(EmbeddingError::EmptyText);
            }
            if text == "fail" {
                return Err(EmbeddingError::InvalidResponse("boom".to_string()));
            }
            let mut vector = vec![0.0_f32; 26];
            for c in text.chars().filter(char::is_ascii_alphabetic) {
                vector[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
            }
            Ok(vector)
        }

        fn model(&self) -> &str {
            "letters"
        }
    }

    /// Embeds normally until `broken` is set.
    #[derive(Default)]
    struct FlakyEmbedder {
        broken: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl Embedder for FlakyEmbedder {
        async fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, EmbeddingError> {
            if self.broken.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(EmbeddingError::InvalidResponse("service went away".to_string()));
            }
            LetterEmbedder.embed(text).await
        }

        fn model(&self) -> &str {
            "flaky"
        }
    }

    pub(crate) fn service() -> SemanticQuotes {
        SemanticQuotes::new(Arc::new(LetterEmbedder), Arc::new(MemoryVectorStore::new()))
    }

    #[tokio::test]
    async fn test_initialize_loads_all_quotes() {
        let service = service();
        assert!(service.is_empty().await.unwrap());

        let outcome = service.initialize(false).await.unwrap();
        assert_eq!(outcome, InitOutcome::loaded(24));
        assert_eq!(service.all().await.unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_initialize_skips_when_loaded() {
        let service = service();
        service.initialize(false).await.unwrap();

        let outcome = service.initialize(false).await.unwrap();
        assert_eq!(outcome.status, crate::quotes::InitStatus::Skipped);
        assert_eq!(outcome.message, "Quotes already loaded");
        assert_eq!(outcome.count, 0);
    }

    #[tokio::test]
    async fn test_force_initialize_replaces_entries() {
        let service = service();
        service.initialize(false).await.unwrap();
        service.initialize(true).await.unwrap();
        assert_eq!(service.store().count().await.unwrap(), 24);
    }

    #[tokio::test]
    async fn test_failed_force_reload_keeps_entries() {
        let embedder = Arc::new(FlakyEmbedder::default());
        let service = SemanticQuotes::new(embedder.clone(), Arc::new(MemoryVectorStore::new()));
        service.initialize(false).await.unwrap();

        embedder.broken.store(true, std::sync::atomic::Ordering::SeqCst);
        assert!(matches!(service.initialize(true).await, Err(QuotesError::Embedding(_))));
        assert_eq!(service.store().count().await.unwrap(), 24);
    }

    #[tokio::test]
    async fn test_search_zero_k_rejected() {
        let service = service();
        service.initialize(false).await.unwrap();

        let result = service.search("education", 0).await;
        assert!(matches!(result, Err(QuotesError::Similarity(SimilarityError::InvalidArgument(_)))));
    }

    #[tokio::test]
    async fn test_search_ranks_and_limits() {
        let service = service();
        service.initialize(false).await.unwrap();

        let results = service.search("education", 5).await.unwrap();
        assert_eq!(results.len(), 5);
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[tokio::test]
    async fn test_search_clamps_k_to_collection() {
        let service = service();
        service.initialize(false).await.unwrap();
        assert_eq!(service.search("hard work", 100).await.unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_search_validation() {
        let service = service();
        assert!(matches!(service.search("  ", 3).await, Err(QuotesError::Validation(_))));
        assert!(service.search("kindness", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_random_on_empty_store() {
        let service = service();
        assert!(matches!(service.random().await, Err(QuotesError::NotFound(_))));

        service.initialize(false).await.unwrap();
        assert!(service.random().await.is_ok());
    }

    #[tokio::test]
    async fn test_clean() {
        let service = service();
        service.initialize(false).await.unwrap();
        assert_eq!(service.clean().await.unwrap(), 24);
        assert!(service.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_compare_words() {
        let service = service();
        let same = service.compare_words("man", "man").await.unwrap();
        assert!((same.similarity - 1.0).abs() < 1e-9);

        let result = service.compare_words("man", " ").await;
        assert!(matches!(result, Err(QuotesError::Validation(_))));
    }

    #[tokio::test]
    async fn test_word_similarity_records_failures() {
        let service = service();
        let results = service
            .word_similarity(&[("fail", "man"), ("man", "man"), ("man", "dirt")])
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].word2, "man");
        assert!(results[0].error.is_none());

        let failed = results.iter().find(|r| r.word1 == "fail").unwrap();
        assert_eq!(failed.similarity, 0.0);
        assert!(failed.error.is_some());
    }

    #[tokio::test]
    async fn test_default_pairs_sorted() {
        let results = service().word_similarity(&DEFAULT_WORD_PAIRS).await;
        assert_eq!(results.len(), 9);
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_word_similarity_json_omits_missing_error() {
        let json = serde_json::to_value(WordSimilarity {
            word1: "a".into(),
            word2: "b".into(),
            similarity: 0.5,
            error: None,
        })
        .unwrap();
        assert!(json.get("error").is_none());
    }
}
