//! API error taxonomy
//!
//! Every failure the handlers can produce maps onto one of these variants,
//! and every variant renders as a `{"error": "<message>"}` JSON body with
//! the matching status code. Nothing here is fatal to the process.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// A required field is missing or malformed (400)
    #[error("{0}")]
    Validation(String),

    /// The requested record does not exist (404)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// An upload was refused: zero files, disallowed type or too large (400)
    #[error("{0}")]
    UploadRejected(String),

    /// The multipart body could not be read (400)
    #[error("invalid multipart request: {0}")]
    Multipart(#[from] MultipartError),

    /// Blob store I/O failed (500)
    #[error("file storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal fault (500); never carries raw internals to
    /// the client beyond the message given here
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn upload_rejected(message: impl Into<String>) -> Self {
        Self::UploadRejected(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::UploadRejected(_) | Self::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Io(ref e) => error!("blob store I/O error: {e}"),
            Self::Internal(ref message) => error!("internal error: {message}"),
            _ => {}
        }

        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
