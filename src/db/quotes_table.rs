

use async_trait::async_trait;
use r2d2_postgres::postgres::Row;
use tracing::{info, warn};

use super::DatabasePool;
use crate::core::error::Result;
use crate::quotes::{InitOutcome, Quote, QuoteStore, all_quotes};


const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS quotes (
        id SERIAL PRIMARY KEY,
        text TEXT NOT NULL,
        category VARCHAR(100) NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

const SELECT_RANDOM: &str = "SELECT text, category FROM quotes ORDER BY RANDOM() LIMIT 1";
const SELECT_ALL: &str = "SELECT text, category FROM quotes ORDER BY id";
const COUNT: &str = "SELECT COUNT(*) FROM quotes";
const INSERT: &str = "INSERT INTO quotes (text, category) VALUES ($1, $2)";
const DELETE_ALL: &str = "DELETE FROM quotes";


fn quote_from_row(row: &Row) -> Result<Quote> {
    Ok(Quote::new(
        row.try_get::<_, String>("text")?,
        row.try_get::<_, String>("category")?,
    ))
}


/// The `quotes` table.
pub struct PgQuoteStore {
    pool: DatabasePool,
}

impl PgQuoteStore {
    /// Creates the table when missing.
    pub async fn new(pool: DatabasePool) -> Result<Self> {
        pool.run(|client| {
            client.batch_execute(CREATE_TABLE)?;
            Ok(())
        })
        .await?;

        info!("Quotes table ready");
        Ok(Self { pool })
    }


    pub async fn count(&self) -> Result<usize> {
        let count: i64 = self
            .pool
            .run(|client| Ok(client.query_one(COUNT, &[])?.try_get(0)?))
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }


    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

#[async_trait]
impl QuoteStore for PgQuoteStore {
    async fn random(&self) -> Result<Option<Quote>> {
        self.pool
            .run(|client| {
                client
                    .query_opt(SELECT_RANDOM, &[])?
                    .as_ref()
                    .map(quote_from_row)
                    .transpose()
            })
            .await
    }

    async fn all(&self) -> Result<Vec<Quote>> {
        self.pool
            .run(|client| client.query(SELECT_ALL, &[])?.iter().map(quote_from_row).collect())
            .await
    }

    async fn initialize(&self, force: bool) -> Result<InitOutcome> {
        let existing = self.count().await?;
        if existing > 0 && !force {
            info!("Quotes table already holds {} rows, skipping load", existing);
            return Ok(InitOutcome::loaded(existing));
        }

        let quotes = all_quotes();
        let inserted = self
            .pool
            .run(move |client| {
                let mut tx = client.transaction()?;
                if force {
                    let removed = tx.execute(DELETE_ALL, &[])?;
                    if removed > 0 {
                        warn!("Force reload: deleted {} existing quotes", removed);
                    }
                }
                for quote in &quotes {
                    tx.execute(INSERT, &[&quote.text, &quote.category])?;
                }
                tx.commit()?;
                Ok(quotes.len())
            })
            .await?;

        info!("Inserted {} quotes", inserted);
        Ok(InitOutcome::loaded(inserted))
    }

    async fn clean(&self) -> Result<u64> {
        let removed = self
            .pool
            .run(|client| Ok(client.execute(DELETE_ALL, &[])?))
            .await?;
        info!("Deleted {} quote(s) from database", removed);
        Ok(removed)
    }

    async fn health(&self) -> Result<()> {
        self.pool.health_check().await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
