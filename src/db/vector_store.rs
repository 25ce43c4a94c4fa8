

use async_trait::async_trait;
use r2d2_postgres::postgres::Row;
use tracing::{debug, info};

use super::DatabasePool;
use crate::core::error::Result;
use crate::search::{Document, Entry, VectorStore};


const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS quote_embeddings (
        seq BIGSERIAL,
        id TEXT PRIMARY KEY,
        collection TEXT NOT NULL,
        text TEXT NOT NULL,
        category TEXT NOT NULL,
        embedding REAL[] NOT NULL
    );
    CREATE INDEX IF NOT EXISTS quote_embeddings_collection_idx
        ON quote_embeddings (collection)";

const INSERT: &str = "INSERT INTO quote_embeddings (id, collection, text, category, embedding)
    VALUES ($1, $2, $3, $4, $5)";
const SELECT_ALL: &str = "SELECT id, text, category, embedding FROM quote_embeddings
    WHERE collection = $1 ORDER BY seq";
const COUNT: &str = "SELECT COUNT(*) FROM quote_embeddings WHERE collection = $1";
const DELETE_ALL: &str = "DELETE FROM quote_embeddings WHERE collection = $1";


fn entry_from_row(row: &Row) -> Result<Entry> {
    let document = Document::with_id(
        row.try_get::<_, String>("id")?,
        row.try_get::<_, String>("text")?,
        row.try_get::<_, String>("category")?,
    );
    Ok((document, row.try_get::<_, Vec<f32>>("embedding")?))
}


/// Embeddings of one named collection in the `quote_embeddings` table.
///
/// Rows are returned whole; scoring happens in [`crate::search::rank_by_similarity`].
pub struct PgVectorStore {
    pool: DatabasePool,
    collection: String,
}

impl PgVectorStore {
    pub async fn new(pool: DatabasePool, collection: impl Into<String>) -> Result<Self> {
        let collection = collection.into();

        pool.run(|client| {
            client.batch_execute(CREATE_TABLE)?;
            Ok(())
        })
        .await?;

        info!("Vector table ready (collection '{}')", collection);
        Ok(Self { pool, collection })
    }


    pub fn collection(&self) -> &str {
        &self.collection
    }


    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn add(&self, entries: Vec<Entry>) -> Result<usize> {
        let collection = self.collection.clone();
        let added = self
            .pool
            .run(move |client| {
                let mut tx = client.transaction()?;
                for (document, embedding) in &entries {
                    tx.execute(
                        INSERT,
                        &[&document.id, &collection, &document.text, &document.category, embedding],
                    )?;
                }
                tx.commit()?;
                Ok(entries.len())
            })
            .await?;

        debug!("Stored {} embeddings in '{}'", added, self.collection);
        Ok(added)
    }

    async fn entries(&self) -> Result<Vec<Entry>> {
        let collection = self.collection.clone();
        self.pool
            .run(move |client| {
                client
                    .query(SELECT_ALL, &[&collection])?
                    .iter()
                    .map(entry_from_row)
                    .collect()
            })
            .await
    }

    async fn count(&self) -> Result<usize> {
        let collection = self.collection.clone();
        let count: i64 = self
            .pool
            .run(move |client| Ok(client.query_one(COUNT, &[&collection])?.try_get(0)?))
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn clear(&self) -> Result<u64> {
        let collection = self.collection.clone();
        self.pool
            .run(move |client| Ok(client.execute(DELETE_ALL, &[&collection])?))
            .await
    }

    async fn replace(&self, entries: Vec<Entry>) -> Result<(u64, usize)> {
        let collection = self.collection.clone();
        let (removed, added) = self
            .pool
            .run(move |client| {
                let mut tx = client.transaction()?;
                let removed = tx.execute(DELETE_ALL, &[&collection])?;
                for (document, embedding) in &entries {
                    tx.execute(
                        INSERT,
                        &[&document.id, &collection, &document.text, &document.category, embedding],
                    )?;
                }
                tx.commit()?;
                Ok((removed, entries.len()))
            })
            .await?;

        debug!("Replaced {} embeddings with {} in '{}'", removed, added, self.collection);
        Ok((removed, added))
    }

    async fn health(&self) -> Result<()> {
        self.pool.health_check().await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
