

pub mod error;
pub mod info;
pub mod quotes;
pub mod semantic;

pub use error::ApiError;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::core::runtime::SemanticRuntime;
use crate::quotes::{InMemoryQuoteStore, QuoteStore};


fn with_layers(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}


/// Stage 1: the in-memory dataset.
pub fn random_router() -> Router {
    let store: Arc<dyn QuoteStore> = Arc::new(InMemoryQuoteStore::new());

    with_layers(
        Router::new()
            .route("/", get(info::root_random))
            .route("/health", get(quotes::health))
            .route("/quote", get(quotes::random_quote))
            .route("/quotes", get(quotes::all_quotes))
            .with_state(store),
    )
}


/// Stage 2: any [`QuoteStore`], usually the `quotes` table.
pub fn postgres_router(store: Arc<dyn QuoteStore>) -> Router {
    with_layers(
        Router::new()
            .route("/", get(info::root_postgres))
            .route("/health", get(quotes::store_health))
            .route("/quote", get(quotes::random_quote))
            .route("/quotes", get(quotes::all_quotes))
            .route("/quotes/init", post(quotes::init_quotes))
            .route("/quotes/clean", post(quotes::clean_quotes))
            .with_state(store),
    )
}


/// Stage 3: semantic search.
pub fn semantic_router(runtime: Arc<SemanticRuntime>) -> Router {
    with_layers(
        Router::new()
            .route("/", get(info::root_semantic))
            .route("/health", get(semantic::health))
            .route("/quotes", get(semantic::search_quotes))
            .route("/quotes/init", post(semantic::init_quotes))
            .route("/quotes/clean", post(semantic::clean_quotes))
            .route("/words", get(semantic::word_similarity))
            .with_state(runtime),
    )
}


/// Stage 4 REST surface; the MCP service is nested by [`crate::mcp::http_router`].
pub fn mcp_rest_router(runtime: Arc<SemanticRuntime>) -> Router {
    with_layers(
        Router::new()
            .route("/", get(info::root_mcp))
            .route("/health", get(semantic::health))
            .with_state(runtime),
    )
}


/// Serves `router` on `addr` until Ctrl-C.
pub async fn serve(router: Router, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received, stopping server");
    }
}
