//! Error types for the catalog client.

use songinfo_core::SongInfoError;
use thiserror::Error;

/// Errors that can occur when querying the music catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog returned an error response
    #[error("Catalog error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid catalog URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse catalog response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Artist identifier is not numeric
    #[error("Invalid artist id: {0}")]
    InvalidArtistId(String),

    /// Catalog is offline or unreachable
    #[error("Catalog unreachable: {0}")]
    ServerUnreachable(String),
}

impl CatalogError {
    /// Classify a transport failure
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

impl From<CatalogError> for SongInfoError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ServerUnreachable(msg) => SongInfoError::Unreachable(msg),
            CatalogError::InvalidUrl(_) | CatalogError::InvalidArtistId(_) => {
                SongInfoError::invalid_input(err.to_string())
            }
            other => SongInfoError::Catalog(other.to_string()),
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
