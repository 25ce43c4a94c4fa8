

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use super::error::ApiError;
use crate::core::error::QuotesError;
use crate::quotes::{InitOutcome, Quote, QuoteStore};


pub type StoreState = Arc<dyn QuoteStore>;


#[derive(Debug, Default, Deserialize)]
pub struct InitParams {
    #[serde(default)]
    pub force: bool,
}


pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Always 200; a broken database shows up under `services.database`.
pub async fn store_health(State(store): State<StoreState>) -> Json<Value> {
    let database = match store.health().await {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            warn!("Database health check failed: {}", e);
            format!("error: {}", e)
        }
    };

    Json(json!({
        "status": "healthy",
        "services": { "database": database }
    }))
}


pub async fn random_quote(State(store): State<StoreState>) -> Result<Json<Quote>, ApiError> {
    let quote = store.random().await?.ok_or_else(|| {
        QuotesError::NotFound(
            "No quotes found in database. Please initialize quotes using POST /quotes/init"
                .to_string(),
        )
    })?;

    info!("Returning random quote from category: {}", quote.category);
    Ok(Json(quote))
}


pub async fn all_quotes(State(store): State<StoreState>) -> Result<Json<Vec<Quote>>, ApiError> {
    let quotes = store.all().await?;
    info!("Returning {} quotes", quotes.len());
    Ok(Json(quotes))
}


pub async fn init_quotes(
    State(store): State<StoreState>,
    Query(params): Query<InitParams>,
) -> Result<Json<InitOutcome>, ApiError> {
    info!("Quote initialization requested (force={})", params.force);
    Ok(Json(store.initialize(params.force).await?))
}


pub async fn clean_quotes(State(store): State<StoreState>) -> Result<Json<Value>, ApiError> {
    store.clean().await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Database cleaned"
    })))
}
