//! Error types for geosuggest

use thiserror::Error;

/// Main error type for geosuggest operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Geocoding API returned status {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("No suggestion at index {0}")]
    NoSuchSuggestion(usize),
}

/// Result type alias for geosuggest operations
pub type Result<T> = std::result::Result<T, Error>;
