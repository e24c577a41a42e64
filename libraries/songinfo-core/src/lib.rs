//! Song Info Finder Core
//!
//! Metadata reconciliation for Song Info Finder: how tags read from an audio
//! file, edits submitted by the user, and hits from a remote music catalog are
//! merged, normalized, and turned into a field set ready to be written back.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `TagRecord`, `RemoteCandidate`, `SaveFields`, `TagField`
//! - **Adapter Traits**: `TagStore`, `CatalogSearch`, `ArtworkSource`
//! - **Reconciler**: the operations tying the two together
//! - **Error Handling**: unified `SongInfoError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use songinfo_core::{derive_search_terms, overlay_fields, FieldEdits, TagField, TagRecord};
//!
//! let mut record = TagRecord::new();
//! record.set(TagField::Title, "Paranoid Android");
//! record.set(TagField::Artist, "Radiohead");
//!
//! let mut edits = FieldEdits::new();
//! edits.insert("album", "OK Computer");
//! overlay_fields(&mut record, &edits);
//!
//! let terms = derive_search_terms(&record, &TagField::DEFAULT_SEARCH_ORDER);
//! assert_eq!(terms, vec!["Paranoid Android", "Radiohead", "OK Computer"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod date;
pub mod error;
pub mod format;
pub mod reconcile;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SongInfoError};
pub use reconcile::{
    derive_search_terms, merge_for_save, normalize_candidate, normalize_candidates,
    overlay_fields, MergeSource, OverlayReport, Reconciler,
};
pub use traits::{ArtworkSource, CatalogSearch, TagStore};
pub use types::{
    ArtworkData, ArtworkOutcome, CatalogKeys, FieldEdits, RawHit, RemoteCandidate, ResultsLimit,
    SaveFields, SaveOutcome, TagField, TagRecord, TagRecordView,
};
