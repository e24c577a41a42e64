use songinfo_core::SongInfoError;
use thiserror::Error;

/// Errors that can occur while fetching cover art
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// URL is malformed or not http(s)
    #[error("Invalid artwork URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed
    #[error("Download failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Download failed with status {0}")]
    Status(u16),

    /// Image could not be decoded or re-encoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Artwork too large
    #[error("Artwork too large: {0} bytes (max {1} bytes)")]
    TooLarge(usize, usize),

    /// Response had no body
    #[error("Artwork response was empty")]
    Empty,
}

impl From<ArtworkError> for SongInfoError {
    fn from(err: ArtworkError) -> Self {
        SongInfoError::embed_failed(err.to_string())
    }
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
