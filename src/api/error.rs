

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::core::error::QuotesError;


/// [`QuotesError`] rendered as `{"detail": "..."}` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub QuotesError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            QuotesError::Validation(_) | QuotesError::Similarity(_) => StatusCode::BAD_REQUEST,
            QuotesError::NotFound(_) => StatusCode::NOT_FOUND,
            QuotesError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }


    pub fn detail(&self) -> String {
        match &self.0 {
            QuotesError::Validation(msg)
            | QuotesError::NotFound(msg)
            | QuotesError::ServiceUnavailable(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl<E: Into<QuotesError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            error!("Request failed ({}): {}", status.as_u16(), detail);
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
