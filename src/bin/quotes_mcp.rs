

use cf_quotes::mcp::run_server;
use cf_quotes::platform::ServiceBindings;
use cf_quotes::{QuotesConfig, SemanticRuntime};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol in stdio mode, so logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,cf_quotes=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = QuotesConfig::from_env()?;
    let bindings = ServiceBindings::from_env()?;

    run_server(Arc::new(SemanticRuntime::from_platform(config, bindings))).await
}
