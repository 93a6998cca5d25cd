use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scout_rag::ScoutError;
use thiserror::Error;
use tracing::error;

use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        hint: Option<String>,
    },

    // --- Pipeline ---
    /// The deployment is misconfigured (should have failed at startup).
    #[error("configuration error: {0}")]
    Config(String),

    /// Embedding, index or chat provider failed.
    #[error("upstream provider failed: {0}")]
    Provider(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            hint: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Bind(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Provider(_) => "PROVIDER_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "request failed");
        }
        let hint = match &self {
            AppError::BadRequest { hint, .. } => hint.clone(),
            _ => None,
        };
        ApiResponse::<()>::error(self.error_code(), self.to_string(), hint)
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        let text = err.body_text();
        let hint = if text.contains("missing field") {
            Some("Required fields: `question` for /ask, `query` for /search.".into())
        } else if text.contains("invalid type") {
            Some("`top_k` must be a positive integer and `show_sources` a boolean.".into())
        } else if matches!(err, JsonRejection::MissingJsonContentType(_)) {
            Some("Send the body with `Content-Type: application/json`.".into())
        } else {
            None
        };
        AppError::BadRequest {
            message: text,
            hint,
        }
    }
}

impl From<ScoutError> for AppError {
    fn from(err: ScoutError) -> Self {
        if err.is_invalid_input() {
            AppError::bad_request(err.to_string())
        } else if err.is_config() {
            AppError::Config(err.to_string())
        } else {
            AppError::Provider(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use rag_store::RagError;

    use super::*;

    #[test]
    fn pipeline_errors_map_to_status_and_code() {
        let e = AppError::from(ScoutError::from(RagError::InvalidTopK));
        assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);

        let e = AppError::from(ScoutError::from(RagError::Decode("eof".into())));
        assert_eq!(e.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(e.error_code(), "PROVIDER_ERROR");

        let e = AppError::from(ScoutError::from(RagError::Config("no key".into())));
        assert_eq!(e.error_code(), "CONFIG_ERROR");
    }
}
