/// Adapter traits for Song Info Finder
use crate::error::Result;
use crate::types::{ArtworkData, RawHit, ResultsLimit, SaveFields, TagRecord};
use async_trait::async_trait;
use std::path::Path;

/// Tag persistence
///
/// Implementers read and write the tag container embedded in an audio file
pub trait TagStore: Send + Sync {
    /// Read the editable fields and stream properties of a file
    ///
    /// # Errors
    /// Returns an error if the file cannot be probed or its tags parsed
    fn read_tags(&self, path: &Path) -> Result<TagRecord>;

    /// Write every field of `fields` to the file
    ///
    /// # Errors
    /// Returns `SaveFailed` if the tags cannot be written
    fn write_tags(&self, path: &Path, fields: &SaveFields) -> Result<()>;

    /// Replace the file's front cover with `artwork`
    ///
    /// # Errors
    /// Returns `EmbedFailed` if the picture cannot be written
    fn embed_artwork(&self, path: &Path, artwork: &ArtworkData) -> Result<()>;

    /// Front cover currently embedded in the file, if any
    fn read_artwork(&self, path: &Path) -> Result<Option<ArtworkData>>;
}

/// Remote music catalog search
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search the catalog with ordered terms
    ///
    /// Returns at most `limit` raw hits. Zero matches is an empty list, not
    /// an error.
    ///
    /// # Errors
    /// Returns `Unreachable` when the catalog cannot be contacted
    async fn search(&self, terms: &[String], limit: ResultsLimit) -> Result<Vec<RawHit>>;

    /// Raw catalog entries (songs, then albums) of one artist
    ///
    /// Catalogs without artist lookup return nothing.
    async fn music_by_artist(&self, _artist_id: &str) -> Result<Vec<RawHit>> {
        Ok(Vec::new())
    }
}

/// Source of cover art images
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Download the image behind `url`, ready to embed
    ///
    /// # Errors
    /// Returns `EmbedFailed` if the image cannot be downloaded or decoded
    async fn fetch(&self, url: &str) -> Result<ArtworkData>;
}
