//! Song Info Finder Metadata
//!
//! Tag persistence for Song Info Finder, built on lofty.
//!
//! This crate provides:
//! - Reading the editable fields, bitrate, and duration of an audio file
//! - Writing a complete field set back to the file's primary tag
//! - Embedding and reading front cover artwork
//!
//! # Example
//!
//! ```rust,no_run
//! use songinfo_core::TagStore;
//! use songinfo_metadata::LoftyTagStore;
//! use std::path::Path;
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = LoftyTagStore::new();
//! let record = store.read_tags(Path::new("/music/song.mp3"))?;
//! println!("{} ({})", record.duration_display(), record.bitrate_display());
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

pub use error::{MetadataError, Result};
pub use store::{LoftyTagStore, MAX_ARTWORK_SIZE};
