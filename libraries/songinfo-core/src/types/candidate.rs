/// Catalog search result types
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw hit as returned by the catalog search adapter
pub type RawHit = Map<String, Value>;

/// Key names under which a raw catalog hit carries each value.
///
/// Defaults to the names used by the iTunes Search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogKeys {
    pub track_name: String,
    pub artist_name: String,
    pub collection_name: String,
    pub primary_genre: String,
    pub track_number: String,
    pub disc_number: String,
    pub release_date: String,
    pub artwork_large: String,
    pub artwork_small: String,
}

impl Default for CatalogKeys {
    fn default() -> Self {
        Self {
            track_name: "trackName".to_string(),
            artist_name: "artistName".to_string(),
            collection_name: "collectionName".to_string(),
            primary_genre: "primaryGenreName".to_string(),
            track_number: "trackNumber".to_string(),
            disc_number: "discNumber".to_string(),
            release_date: "releaseDate".to_string(),
            artwork_large: "artworkUrl1000".to_string(),
            artwork_small: "artworkUrl100".to_string(),
        }
    }
}

/// A catalog hit projected onto the editable tag fields.
///
/// Candidates are merge sources only; they never own a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCandidate {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    /// Passed through exactly as the catalog sent it (number or string)
    pub tracknumber: Option<Value>,
    pub discnumber: Option<Value>,
    pub albumartist: Option<String>,
    pub year: String,
    /// Highest resolution artwork URL known for the hit, or empty
    pub thumbnail_url: String,
}

impl RemoteCandidate {
    /// Artwork URL if one is known
    pub fn thumbnail(&self) -> Option<&str> {
        Some(self.thumbnail_url.as_str()).filter(|url| !url.is_empty())
    }
}

/// Render a passed-through catalog value as tag text.
///
/// Strings are taken as-is and numbers use their JSON rendering; anything
/// else has no tag representation.
pub fn value_as_tag_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
