/// Core error types for Song Info Finder
use thiserror::Error;

/// Result type alias using `SongInfoError`
pub type Result<T> = std::result::Result<T, SongInfoError>;

/// Core error type for Song Info Finder
#[derive(Error, Debug)]
pub enum SongInfoError {
    /// Path missing or not an allowed audio file
    #[error("{0}")]
    NotFound(String),

    /// Tags could not be read from the file
    #[error("Could not read tags: {0}")]
    ExtractionFailed(String),

    /// Catalog could not be reached
    #[error("Catalog unreachable: {0}")]
    Unreachable(String),

    /// A single catalog hit could not be normalized
    #[error("Malformed candidate: {0}")]
    MalformedCandidate(String),

    /// Tags could not be written back to the file
    #[error("Could not save metadata: {0}")]
    SaveFailed(String),

    /// Cover art could not be downloaded or embedded
    #[error("Could not embed artwork: {0}")]
    EmbedFailed(String),

    /// Catalog answered with something unusable
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SongInfoError {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::ExtractionFailed(msg.into())
    }

    /// Create a malformed candidate error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedCandidate(msg.into())
    }

    /// Create a save error
    pub fn save_failed(msg: impl Into<String>) -> Self {
        Self::SaveFailed(msg.into())
    }

    /// Create an embed error
    pub fn embed_failed(msg: impl Into<String>) -> Self {
        Self::EmbedFailed(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Message suitable for showing to the person using the app
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::InvalidInput(msg) => msg.clone(),
            Self::Unreachable(_) => "No internet connection.".to_string(),
            Self::SaveFailed(_) => "Could not save metadata.".to_string(),
            Self::EmbedFailed(_) => "Could not embed thumbnail.".to_string(),
            other => format!("Error processing file: {}", other),
        }
    }
}
