mod artwork;
mod candidate;
mod field;
mod limit;
mod record;
mod save;

pub use artwork::ArtworkData;
pub use candidate::{value_as_tag_text, CatalogKeys, RawHit, RemoteCandidate};
pub use field::TagField;
pub use limit::ResultsLimit;
pub use record::{FieldEdits, TagRecord, TagRecordView};
pub use save::{ArtworkOutcome, SaveFields, SaveOutcome};
