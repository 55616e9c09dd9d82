/// Error types for the presentation writer.
use thiserror::Error;

/// Result type for deck operations.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors raised while building, serializing or reading back a deck.
#[derive(Error, Debug)]
pub enum DeckError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML generation or parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Unsupported or unreadable content (e.g. an image of unknown format)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Part missing from a package being inspected
    #[error("Part not found: {0}")]
    PartNotFound(String),
}

impl From<zip::result::ZipError> for DeckError {
    fn from(err: zip::result::ZipError) -> Self {
        DeckError::Zip(err.to_string())
    }
}

impl From<quick_xml::Error> for DeckError {
    fn from(err: quick_xml::Error) -> Self {
        DeckError::Xml(err.to_string())
    }
}

impl From<std::fmt::Error> for DeckError {
    fn from(err: std::fmt::Error) -> Self {
        DeckError::Xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for DeckError {
    fn from(err: std::str::Utf8Error) -> Self {
        DeckError::Xml(err.to_string())
    }
}
