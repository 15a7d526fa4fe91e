use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read the external hotspot table.
///
/// The server recovers from every variant by substituting the built-in
/// hotspots; `check` reports them.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to open hotspot file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed hotspot CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Hotspot CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Hotspot '{name}' on row {row} has coordinates out of range ({latitude}, {longitude})")]
    CoordinateOutOfRange {
        row: usize,
        name: String,
        latitude: f64,
        longitude: f64,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    /// A page outside the fixed navigation set was requested.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Failed to encode page data: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidState(_) => StatusCode::NOT_FOUND,
            AppError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!("Request failed: {}", self);
        let body = format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{0}</title></head>\
             <body><h1>{0}</h1><p><a href=\"/\">Back to Home</a></p></body></html>",
            status
        );
        (status, Html(body)).into_response()
    }
}
