/// Save request and outcome types
use crate::types::{TagField, TagRecordView};
use serde::{Deserialize, Serialize};

/// Complete field set ready to be written to a file.
///
/// Every editable field is present; an empty string means "no value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveFields {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub tracknumber: String,
    pub discnumber: String,
    pub albumartist: String,
    pub composer: String,
    pub year: String,
    /// Cover art to download and embed after the tags are written
    pub thumbnail_url: Option<String>,
}

impl SaveFields {
    /// Value to be written for a field
    pub fn get(&self, field: TagField) -> &str {
        match field {
            TagField::Title => &self.title,
            TagField::Artist => &self.artist,
            TagField::Album => &self.album,
            TagField::Genre => &self.genre,
            TagField::TrackNumber => &self.tracknumber,
            TagField::DiscNumber => &self.discnumber,
            TagField::AlbumArtist => &self.albumartist,
            TagField::Composer => &self.composer,
            TagField::Year => &self.year,
        }
    }

    pub(crate) fn slot(&mut self, field: TagField) -> &mut String {
        match field {
            TagField::Title => &mut self.title,
            TagField::Artist => &mut self.artist,
            TagField::Album => &mut self.album,
            TagField::Genre => &mut self.genre,
            TagField::TrackNumber => &mut self.tracknumber,
            TagField::DiscNumber => &mut self.discnumber,
            TagField::AlbumArtist => &mut self.albumartist,
            TagField::Composer => &mut self.composer,
            TagField::Year => &mut self.year,
        }
    }

    /// Field/value pairs in display order
    pub fn entries(&self) -> impl Iterator<Item = (TagField, &str)> {
        TagField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }
}

/// What happened to the cover art part of a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum ArtworkOutcome {
    /// No thumbnail was supplied with the save
    NotRequested,
    /// Artwork was downloaded and embedded
    Embedded,
    /// Download or embedding failed; the tags were still saved
    Failed(String),
}

/// Result of a successful tag save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub artwork: ArtworkOutcome,
    /// The file's tags as re-read after the save
    pub metadata: TagRecordView,
}
