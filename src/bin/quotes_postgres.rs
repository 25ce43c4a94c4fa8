

use cf_quotes::db::{DatabasePool, PgQuoteStore};
use cf_quotes::platform::{ServiceBindings, resolve_postgres};
use cf_quotes::{QuotesConfig, api};
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

    info!("Random Quotes Demo - Stage 2: PostgreSQL via service binding");
    info!("   📊 Database service: {}", config.vector_db_service_name);

    let binding = resolve_postgres(&bindings, &config)?;
    let pool = DatabasePool::connect(&binding, config.db_max_connections, config.timeout()).await?;
    let store = PgQuoteStore::new(pool).await?;

    api::serve(api::postgres_router(Arc::new(store)), &config.bind_addr()).await?;
    Ok(())
}
