use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::types::AppError;

/// Errors raised while handling one extraction request
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid file data")]
    InvalidInput,

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("File is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Expected {expected} fields in line {line}, saw {found}")]
    TooManyFields { line: u64, expected: usize, found: usize },

    #[error("No columns to parse from {0}")]
    NoColumns(&'static str),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("{0}")]
    Model(#[from] AppError),

    #[error("Model returned invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<calamine::XlsxError> for ExtractError {
    fn from(err: calamine::XlsxError) -> Self {
        ExtractError::Spreadsheet(err.to_string())
    }
}

impl ExtractError {
    pub fn status(&self) -> StatusCode {
        match self {
            ExtractError::InvalidInput
            | ExtractError::UnsupportedType(_)
            | ExtractError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            ExtractError::InvalidInput => serde_json::json!({ "message": "Invalid file data" }),
            ExtractError::UnsupportedType(_) => {
                serde_json::json!({ "message": "Unsupported file type" })
            }
            ExtractError::UnsupportedFormat(_) => {
                serde_json::json!({ "message": "Unsupported file format" })
            }
            other => serde_json::json!({
                "message": "Error processing file",
                "error": other.to_string(),
            }),
        }
    }
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Error processing file: {}", self);
        } else {
            warn!("Rejected request: {}", self);
        }
        (status, Json(self.body())).into_response()
    }
}
