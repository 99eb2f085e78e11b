use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures that abort a whole area search. Everything else degrades to
/// partial or fallback data inside the pipeline.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Provider(String),
    #[error("Area search timed out after {0}s")]
    Timeout(u64),
}

impl SearchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SearchError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SearchError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({
                "success": false,
                "message": self.to_string(),
            })),
        ).into_response()
    }
}
