/// Tag record domain type
use crate::date;
use crate::format;
use crate::types::TagField;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Editable metadata of one audio file, plus read-only stream properties.
///
/// Every editable field is optional: `None` means "unknown", while
/// `Some(String::new())` is an explicit empty value submitted by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagRecord {
    /// File the record was read from (absent for transient records)
    pub filepath: Option<PathBuf>,

    /// Track title
    pub title: Option<String>,

    /// Artist name
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Genre
    pub genre: Option<String>,

    /// Track number as stored in the tag
    pub tracknumber: Option<String>,

    /// Disc number as stored in the tag
    pub discnumber: Option<String>,

    /// Album artist
    pub albumartist: Option<String>,

    /// Composer
    pub composer: Option<String>,

    year: Option<String>,

    /// Audio bitrate in kbps
    pub bitrate_kbps: Option<u32>,

    /// Duration in seconds
    pub duration_secs: Option<f64>,
}

impl TagRecord {
    /// Create an empty record with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record bound to a file
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            filepath: Some(path.into()),
            ..Self::default()
        }
    }

    /// File this record belongs to
    pub fn path(&self) -> Option<&Path> {
        self.filepath.as_deref()
    }

    /// Release year (at most four characters)
    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    /// Set the year from a date-like string, keeping its first four characters
    pub fn set_year(&mut self, value: impl AsRef<str>) {
        self.year = Some(date::truncate_year(value.as_ref()));
    }

    /// Set the year from a structured date
    pub fn set_year_from_date<D: Datelike>(&mut self, value: &D) {
        self.year = Some(date::year_of(value));
    }

    /// Current value of a field
    pub fn get(&self, field: TagField) -> Option<&str> {
        match field {
            TagField::Title => self.title.as_deref(),
            TagField::Artist => self.artist.as_deref(),
            TagField::Album => self.album.as_deref(),
            TagField::Genre => self.genre.as_deref(),
            TagField::TrackNumber => self.tracknumber.as_deref(),
            TagField::DiscNumber => self.discnumber.as_deref(),
            TagField::AlbumArtist => self.albumartist.as_deref(),
            TagField::Composer => self.composer.as_deref(),
            TagField::Year => self.year(),
        }
    }

    /// Overwrite a field; an empty string is kept as an explicit empty value
    pub fn set(&mut self, field: TagField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TagField::Title => self.title = Some(value),
            TagField::Artist => self.artist = Some(value),
            TagField::Album => self.album = Some(value),
            TagField::Genre => self.genre = Some(value),
            TagField::TrackNumber => self.tracknumber = Some(value),
            TagField::DiscNumber => self.discnumber = Some(value),
            TagField::AlbumArtist => self.albumartist = Some(value),
            TagField::Composer => self.composer = Some(value),
            TagField::Year => self.set_year(value),
        }
    }

    /// Reset a field to unknown
    pub fn clear(&mut self, field: TagField) {
        match field {
            TagField::Title => self.title = None,
            TagField::Artist => self.artist = None,
            TagField::Album => self.album = None,
            TagField::Genre => self.genre = None,
            TagField::TrackNumber => self.tracknumber = None,
            TagField::DiscNumber => self.discnumber = None,
            TagField::AlbumArtist => self.albumartist = None,
            TagField::Composer => self.composer = None,
            TagField::Year => self.year = None,
        }
    }

    /// Bitrate rendered for display, e.g. `"192 kbps"`
    pub fn bitrate_display(&self) -> String {
        format::bitrate_display(self.bitrate_kbps)
    }

    /// Duration rendered for display, e.g. `"03:27"`
    pub fn duration_display(&self) -> String {
        format::duration_display(self.duration_secs)
    }

    /// Check if no editable field is known
    pub fn is_empty(&self) -> bool {
        TagField::ALL.iter().all(|field| self.get(*field).is_none())
    }

    /// Plain serializable projection including the derived display fields
    pub fn view(&self) -> TagRecordView {
        TagRecordView {
            filepath: self
                .filepath
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            genre: self.genre.clone(),
            tracknumber: self.tracknumber.clone(),
            discnumber: self.discnumber.clone(),
            albumartist: self.albumartist.clone(),
            composer: self.composer.clone(),
            year: self.year.clone(),
            bitrate_kbps: self.bitrate_kbps,
            duration_seconds: self.duration_secs,
            bitrate_display: self.bitrate_display(),
            duration_display: self.duration_display(),
        }
    }
}

/// Serialized form of a [`TagRecord`] handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecordView {
    pub filepath: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub tracknumber: Option<String>,
    pub discnumber: Option<String>,
    pub albumartist: Option<String>,
    pub composer: Option<String>,
    pub year: Option<String>,
    pub bitrate_kbps: Option<u32>,
    pub duration_seconds: Option<f64>,
    pub bitrate_display: String,
    pub duration_display: String,
}

/// Field values submitted by the user, keyed by field name.
///
/// Names are kept as submitted so that unknown ones can be reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldEdits(BTreeMap<String, String>);

impl FieldEdits {
    /// Name under which a cover art URL may accompany a save request
    pub const THUMBNAIL_KEY: &'static str = "thumbnailUrl";

    /// Create an empty edit set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a submitted value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Submitted value for a field, looking up every accepted spelling.
    ///
    /// When several spellings were submitted the last one in iteration
    /// order wins, the same one [`overlay_fields`](crate::overlay_fields)
    /// leaves on a record.
    pub fn value(&self, field: TagField) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(name, _)| name.parse::<TagField>().ok() == Some(field))
            .map(|(_, value)| value.as_str())
    }

    /// Cover art URL submitted alongside the fields, if non-empty
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.0
            .get(Self::THUMBNAIL_KEY)
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }

    /// All submitted name/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of submitted entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing was submitted
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldEdits {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
