//! Song Info Finder Artwork - cover art download and preparation
//!
//! This library downloads album covers suggested by the catalog and turns
//! them into JPEG data ready to be embedded in an audio file.
//!
//! # Features
//!
//! - http(s) downloads with a timeout and a size cap
//! - JPEG passthrough, re-encoding of PNG, GIF, WebP and BMP to RGB JPEG
//!
//! # Example
//!
//! ```no_run
//! use songinfo_artwork::ArtworkFetcher;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = ArtworkFetcher::new(Duration::from_secs(20))?;
//! let artwork = fetcher
//!     .download("https://is1-ssl.mzstatic.com/image/thumb/cover/1000x1000bb.jpg")
//!     .await?;
//! println!("{} bytes of {}", artwork.data.len(), artwork.mime_type);
//! # Ok(())
//! # }
//! ```

mod convert;
mod error;
mod fetcher;

// Re-export public API
pub use convert::{to_jpeg, JPEG_QUALITY};
pub use error::{ArtworkError, Result};
pub use fetcher::{ArtworkFetcher, MAX_ARTWORK_SIZE};
