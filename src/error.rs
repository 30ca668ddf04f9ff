//! Error types for vidloop
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation, plus the HTTP status mapping used by the API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for vidloop
#[derive(Error, Debug)]
pub enum Error {
    /// Player has not been initialized yet (window/pipeline not up)
    #[error("Video player not initialized")]
    NotInitialized,

    /// Resource not found (missing file, out-of-range video index)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or invalid request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Command could not be delivered to the player thread
    #[error("Failed to send command: {0}")]
    CommandRejected(String),

    /// Video library errors (empty directory, missing default video)
    #[error("Library error: {0}")]
    Library(String),

    /// GStreamer pipeline errors
    #[error("Playback error: {0}")]
    Playback(String),

    /// GLib/GStreamer infrastructure errors
    #[error("GStreamer error: {0}")]
    Glib(#[from] gstreamer::glib::Error),

    /// Pipeline state change failures
    #[error("Pipeline state change failed: {0}")]
    StateChange(#[from] gstreamer::StateChangeError),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Error::CommandRejected(_) => (StatusCode::BAD_REQUEST, "COMMAND_REJECTED"),
            Error::NotInitialized => (StatusCode::INTERNAL_SERVER_ERROR, "NOT_INITIALIZED"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Convenience Result type using vidloop Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let resp = Error::NotFound("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = Error::BadRequest("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = Error::CommandRejected("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = Error::NotInitialized.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = Error::Internal("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
