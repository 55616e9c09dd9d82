/// Crate-level error type.
use thiserror::Error;

use crate::deck::DeckError;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the pipeline stages.
#[derive(Error, Debug)]
pub enum Error {
    /// Writing or reading the deck failed
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),

    /// Image download failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Dropbox request failed
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable access token
    #[error("Credential error: {0}")]
    Credential(String),
}

/// Errors from the image source.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("could not write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the Dropbox API.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status with the response body
    #[error("{status} {body}")]
    Status { status: u16, body: String },

    #[error("could not read local file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid API argument: {0}")]
    Json(#[from] serde_json::Error),

    /// Successful response without the expected field
    #[error("response carried no link")]
    MissingLink,
}
