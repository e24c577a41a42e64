/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use songinfo_core::SongInfoError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SongInfoError> for ServerError {
    fn from(err: SongInfoError) -> Self {
        match err {
            SongInfoError::NotFound(msg) => ServerError::NotFound(msg),
            SongInfoError::InvalidInput(msg) => ServerError::BadRequest(msg),
            SongInfoError::Unreachable(msg) => ServerError::Unavailable(msg),
            SongInfoError::SaveFailed(msg) => ServerError::SaveFailed(msg),
            other => ServerError::Internal(other.user_message()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Unavailable(ref msg) => {
                tracing::warn!("Catalog unreachable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "No internet connection.".to_string(),
                )
            }
            ServerError::SaveFailed(ref msg) => {
                tracing::error!("Save failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not save metadata.".to_string(),
                )
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_is_service_unavailable() {
        let err: ServerError = SongInfoError::Unreachable("dns".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn not_found_keeps_message() {
        let err: ServerError =
            SongInfoError::not_found("File not found. Please check the path.").into();
        assert!(matches!(err, ServerError::NotFound(ref m) if m.contains("check the path")));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_input_is_bad_request() {
        let err: ServerError = SongInfoError::invalid_input("bad id").into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
