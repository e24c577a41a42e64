/// Editable tag field names
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the editable fields of a [`TagRecord`](super::TagRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagField {
    /// Track title
    Title,
    /// Track artist
    Artist,
    /// Album title
    Album,
    /// Genre
    Genre,
    /// Track number (free text, e.g. `"3"` or `"3/12"`)
    TrackNumber,
    /// Disc number
    DiscNumber,
    /// Album artist
    AlbumArtist,
    /// Composer
    Composer,
    /// Release year, four characters
    #[serde(alias = "date")]
    Year,
}

impl TagField {
    /// Every editable field, in display order.
    pub const ALL: [TagField; 9] = [
        TagField::Title,
        TagField::Artist,
        TagField::Album,
        TagField::Genre,
        TagField::TrackNumber,
        TagField::DiscNumber,
        TagField::AlbumArtist,
        TagField::Composer,
        TagField::Year,
    ];

    /// Fields used to build catalog search terms unless configured otherwise.
    pub const DEFAULT_SEARCH_ORDER: [TagField; 3] =
        [TagField::Title, TagField::Artist, TagField::Album];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            TagField::Title => "title",
            TagField::Artist => "artist",
            TagField::Album => "album",
            TagField::Genre => "genre",
            TagField::TrackNumber => "tracknumber",
            TagField::DiscNumber => "discnumber",
            TagField::AlbumArtist => "albumartist",
            TagField::Composer => "composer",
            TagField::Year => "year",
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(TagField::Title),
            "artist" => Ok(TagField::Artist),
            "album" => Ok(TagField::Album),
            "genre" => Ok(TagField::Genre),
            "tracknumber" => Ok(TagField::TrackNumber),
            "discnumber" => Ok(TagField::DiscNumber),
            "albumartist" => Ok(TagField::AlbumArtist),
            "composer" => Ok(TagField::Composer),
            "year" | "date" => Ok(TagField::Year),
            other => Err(format!("unknown tag field '{}'", other)),
        }
    }
}
