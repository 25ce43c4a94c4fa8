

use cf_quotes::{QuotesConfig, api};
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

    info!("Random Quotes Demo - Stage 1: in-memory quotes, no service bindings required");

    api::serve(api::random_router(), &config.bind_addr()).await?;
    Ok(())
}
