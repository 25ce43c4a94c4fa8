

use r2d2::Pool;
use r2d2_postgres::{PostgresConnectionManager, postgres::{Client, Config, NoTls}};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::error::{QuotesError, Result};
use crate::platform::PostgresBinding;


type Manager = PostgresConnectionManager<NoTls>;


/// r2d2 pool of blocking PostgreSQL clients.
///
/// All queries go through [`DatabasePool::run`], which moves the work onto
/// tokio's blocking thread pool.
#[derive(Clone)]
pub struct DatabasePool {
    pool: Pool<Manager>,
    redacted_uri: String,
}

impl DatabasePool {

    pub async fn connect(
        binding: &PostgresBinding,
        max_connections: u32,
        connection_timeout: Duration,
    ) -> Result<Self> {
        let config: Config = binding.connection_uri().parse()?;
        let redacted_uri = binding.redacted_uri();

        info!("Connecting to PostgreSQL service '{}' at {}", binding.name, redacted_uri);

        let manager = PostgresConnectionManager::new(config, NoTls);
        let pool = tokio::task::spawn_blocking(move || {
            Pool::builder()
                .max_size(max_connections.max(1))
                .connection_timeout(connection_timeout)
                .build(manager)
        })
        .await
        .map_err(|e| QuotesError::Internal(format!("Pool setup task failed: {}", e)))??;

        info!("PostgreSQL pool ready (max {} connections)", max_connections.max(1));
        Ok(Self { pool, redacted_uri })
    }

    /// Runs `f` with a pooled client on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Client) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| QuotesError::Internal(format!("Database task failed: {}", e)))?
    }


    pub async fn health_check(&self) -> Result<()> {
        self.run(|client| {
            client.execute("SELECT 1", &[])?;
            Ok(())
        })
        .await?;
        debug!("Database health check passed");
        Ok(())
    }


    pub fn redacted_uri(&self) -> &str {
        &self.redacted_uri
    }
}
