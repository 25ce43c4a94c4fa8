

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::ranking::Document;
use crate::core::error::Result;


/// A document together with its embedding.
pub type Entry = (Document, Vec<f32>);


/// Persistent or in-process collection of embedded documents.
#[async_trait]
pub trait VectorStore: Send + Sync {

    async fn add(&self, entries: Vec<Entry>) -> Result<usize>;

    /// Every stored entry, in insertion order.
    async fn entries(&self) -> Result<Vec<Entry>>;


    async fn documents(&self) -> Result<Vec<Document>> {
        Ok(self.entries().await?.into_iter().map(|(doc, _)| doc).collect())
    }


    async fn count(&self) -> Result<usize>;

    /// Removes every entry, returning how many were deleted.
    async fn clear(&self) -> Result<u64>;

    /// Swaps the whole collection for `entries`; returns `(removed, added)`.
    async fn replace(&self, entries: Vec<Entry>) -> Result<(u64, usize)> {
        let removed = self.clear().await?;
        Ok((removed, self.add(entries).await?))
    }


    async fn health(&self) -> Result<()> {
        self.count().await.map(|_| ())
    }


    fn backend(&self) -> &'static str;
}


#[derive(Debug, Default)]
pub struct MemoryVectorStore {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn add(&self, entries: Vec<Entry>) -> Result<usize> {
        let added = entries.len();
        let mut stored = self.entries.write().await;
        stored.extend(entries);
        debug!("MemoryVectorStore: added {} entries (total {})", added, stored.len());
        Ok(added)
    }

    async fn entries(&self) -> Result<Vec<Entry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }

    async fn clear(&self) -> Result<u64> {
        let mut stored = self.entries.write().await;
        let removed = stored.len() as u64;
        stored.clear();
        Ok(removed)
    }

    async fn replace(&self, entries: Vec<Entry>) -> Result<(u64, usize)> {
        let added = entries.len();
        let mut stored = self.entries.write().await;
        let removed = std::mem::replace(&mut *stored, entries).len() as u64;
        Ok((removed, added))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, vector: Vec<f32>) -> Entry {
        (Document::new(text, "Hard Work"), vector)
    }

    #[tokio::test]
    async fn test_add_and_list_in_order() {
        let store = MemoryVectorStore::new();
        store.add(vec![entry("a", vec![1.0]), entry("b", vec![2.0])]).await.unwrap();
        store.add(vec![entry("c", vec![3.0])]).await.unwrap();

        let texts: Vec<String> = store.documents().await.unwrap().into_iter().map(|d| d.text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryVectorStore::new();
        store.add(vec![entry("a", vec![1.0])]).await.unwrap();

        assert_eq!(store.clear().await.unwrap(), 1);
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.health().await.is_ok());
    }

    #[tokio::test]
    async fn test_replace_swaps_collection() {
        let store = MemoryVectorStore::new();
        store.add(vec![entry("a", vec![1.0]), entry("b", vec![2.0])]).await.unwrap();

        let (removed, added) = store.replace(vec![entry("c", vec![3.0])]).await.unwrap();
        assert_eq!((removed, added), (2, 1));

        let texts: Vec<String> = store.documents().await.unwrap().into_iter().map(|d| d.text).collect();
        assert_eq!(texts, vec!["c"]);
    }
}
