use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Request-level error surface.
///
/// Missing categories on the browse path and missing pages on the tracked
/// link path never reach this type: those degrade to empty-state payloads
/// and redirects instead. What remains is genuine request failure.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("search provider failure: {0}")]
    SearchProvider(anyhow::Error),

    #[error("storage failure: {0}")]
    Store(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            AppError::SearchProvider(_) => StatusCode::BAD_GATEWAY,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &self {
            AppError::SearchProvider(source) | AppError::Store(source) => {
                tracing::error!("request failed with {}: {:#}", status, source);
            }
            _ => {}
        }

        (status, self.to_string()).into_response()
    }
}
