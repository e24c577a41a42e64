/// Metadata-specific errors
use songinfo_core::SongInfoError;
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Tag parsing error
    #[error("Tag parsing error: {0}")]
    ParseError(String),

    /// Tag writing error
    #[error("Tag writing error: {0}")]
    WriteError(String),

    /// Picture could not be embedded
    #[error("Artwork embedding error: {0}")]
    EmbedError(String),

    /// Embedded picture exceeds the size limit
    #[error("Artwork too large: {0} bytes (max {1} bytes)")]
    ArtworkTooLarge(usize, usize),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<MetadataError> for SongInfoError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::FileNotFound(_) => {
                SongInfoError::not_found("File not found. Please check the path.")
            }
            MetadataError::WriteError(msg) => SongInfoError::save_failed(msg),
            MetadataError::EmbedError(msg) => SongInfoError::embed_failed(msg),
            MetadataError::Io(e) => SongInfoError::Io(e),
            other => SongInfoError::extraction(other.to_string()),
        }
    }
}
