

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use super::error::ApiError;
use super::quotes::InitParams;
use crate::core::runtime::{HealthReport, SemanticRuntime};
use crate::quotes::{InitOutcome, QUOTE_COUNT};
use crate::search::{DEFAULT_WORD_PAIRS, WordSimilarity};


pub type RuntimeState = Arc<SemanticRuntime>;


#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub topic: Option<String>,
}


/// 200 when every service is bound and initialized, 503 otherwise.
pub async fn health(State(runtime): State<RuntimeState>) -> (StatusCode, Json<HealthReport>) {
    let report = runtime.health().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

/// Ranked `{text, similarity, category}` for a topic, or every quote without scores.
pub async fn search_quotes(
    State(runtime): State<RuntimeState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let service = runtime.service().await?;

    match params.topic.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(topic) => {
            let results = service.search(topic, QUOTE_COUNT).await?;
            info!("Found {} quotes for topic '{}'", results.len(), topic);
            Ok(Json(results).into_response())
        }
        None => {
            info!("No topic provided, returning all quotes without similarity scores");
            Ok(Json(service.all().await?).into_response())
        }
    }
}


pub async fn init_quotes(
    State(runtime): State<RuntimeState>,
    Query(params): Query<InitParams>,
) -> Result<Json<InitOutcome>, ApiError> {
    let service = runtime.service().await?;
    Ok(Json(service.initialize(params.force).await?))
}


pub async fn clean_quotes(State(runtime): State<RuntimeState>) -> Result<Json<Value>, ApiError> {
    let service = runtime.service().await?;
    service.clean().await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Database cleaned"
    })))
}


pub async fn word_similarity(
    State(runtime): State<RuntimeState>,
) -> Result<Json<Vec<WordSimilarity>>, ApiError> {
    let service = runtime.service().await?;
    let results = service.word_similarity(&DEFAULT_WORD_PAIRS).await;
    info!("Computed similarity for {} word pairs", results.len());
    Ok(Json(results))
}
