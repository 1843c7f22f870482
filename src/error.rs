use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::asr::AudioFormat;

/// Malformed upload requests. Always surfaced as HTTP 400.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No file uploaded")]
    NoFileUploaded,
    #[error("No file selected")]
    NoFileSelected,
    #[error("Unsupported file format. Please upload {}.", AudioFormat::allowed_list())]
    UnsupportedFormat,
}

/// Any failure of the recognition backend. Rendered into the page, never an HTTP error.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("could not decode audio: {0}")]
    Decode(String),
    #[error("recognition service unreachable: {0}")]
    Network(String),
    #[error("recognition service returned {status}: {body}")]
    Service { status: u16, body: String },
    #[error("unexpected response from recognition service: {0}")]
    InvalidResponse(String),
    #[error("speech was not recognized")]
    Unintelligible,
}

impl From<reqwest::Error> for RecognitionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RecognitionError::InvalidResponse(e.to_string())
        } else {
            RecognitionError::Network(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Malformed upload: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    #[error("Failed to store upload: {0}")]
    Storage(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(e) => {
                warn!("Rejected upload: {}", e);
                StatusCode::BAD_REQUEST
            }
            AppError::Multipart(e) => {
                warn!("Malformed multipart body: {}", e);
                e.status()
            }
            AppError::Storage(e) => {
                error!("Could not write upload to temporary storage: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}
