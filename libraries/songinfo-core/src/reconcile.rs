//! Reconciliation of local tags, user edits, and catalog hits.
//!
//! The free functions here are pure; [`Reconciler`] ties them to a
//! [`TagStore`] and the configured search fields, file types, and catalog
//! key names.

use crate::date;
use crate::error::{Result, SongInfoError};
use crate::traits::{ArtworkSource, CatalogSearch, TagStore};
use crate::types::{
    value_as_tag_text, ArtworkData, ArtworkOutcome, CatalogKeys, FieldEdits, RawHit,
    RemoteCandidate, ResultsLimit, SaveFields, SaveOutcome, TagField, TagRecord,
};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument, Span};

/// Outcome of applying submitted edits to a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayReport {
    /// Fields that were overwritten, in submission order
    pub applied: Vec<TagField>,
    /// Submitted names that are not editable fields
    pub unknown: Vec<String>,
}

/// Apply each submitted field as an overwrite on `record`.
///
/// Fields missing from `edits` are left alone; an empty submitted value
/// clears the field to an empty string. Unknown names are skipped and
/// reported.
pub fn overlay_fields(record: &mut TagRecord, edits: &FieldEdits) -> OverlayReport {
    let mut report = OverlayReport::default();

    for (name, value) in edits.iter() {
        if name == FieldEdits::THUMBNAIL_KEY {
            continue;
        }
        match name.parse::<TagField>() {
            Ok(field) => {
                record.set(field, value);
                report.applied.push(field);
            }
            Err(_) => {
                warn!(field = %name, "Ignoring unknown tag field");
                report.unknown.push(name.to_string());
            }
        }
    }

    report
}

/// Ordered, non-empty values of `order` taken from `record`.
pub fn derive_search_terms(record: &TagRecord, order: &[TagField]) -> Vec<String> {
    order
        .iter()
        .filter_map(|field| record.get(*field))
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Project one raw catalog hit onto the tag fields.
///
/// # Errors
/// Returns `MalformedCandidate` if the release date is missing or cannot be
/// parsed as an ISO-8601 timestamp.
pub fn normalize_candidate(hit: &RawHit, keys: &CatalogKeys) -> Result<RemoteCandidate> {
    let text = |key: &str| hit.get(key).and_then(Value::as_str).map(str::to_string);
    let raw = |key: &str| hit.get(key).filter(|v| !v.is_null()).cloned();

    let release_date = hit
        .get(&keys.release_date)
        .and_then(Value::as_str)
        .ok_or_else(|| SongInfoError::malformed(format!("missing '{}'", keys.release_date)))?;
    let year = date::year_from_release_date(release_date).ok_or_else(|| {
        SongInfoError::malformed(format!("unparseable release date '{}'", release_date))
    })?;

    let artist = text(&keys.artist_name);

    Ok(RemoteCandidate {
        title: text(&keys.track_name),
        artist: artist.clone(),
        album: text(&keys.collection_name),
        genre: text(&keys.primary_genre),
        tracknumber: raw(&keys.track_number),
        discnumber: raw(&keys.disc_number),
        albumartist: artist,
        year,
        thumbnail_url: thumbnail_url(hit, keys),
    })
}

/// Best artwork URL of a hit: the large variant if present, otherwise the
/// small one upgraded to 1000x1000, otherwise empty.
fn thumbnail_url(hit: &RawHit, keys: &CatalogKeys) -> String {
    let url = |key: &str| {
        hit.get(key)
            .and_then(Value::as_str)
            .filter(|u| !u.trim().is_empty())
    };

    if let Some(large) = url(&keys.artwork_large) {
        return large.to_string();
    }
    url(&keys.artwork_small)
        .map(|small| small.replace("100x100", "1000x1000"))
        .unwrap_or_default()
}

/// Normalize a batch of hits, skipping the ones that are malformed.
pub fn normalize_candidates(hits: Vec<RawHit>, keys: &CatalogKeys) -> Vec<RemoteCandidate> {
    let total = hits.len();
    let candidates: Vec<RemoteCandidate> = hits
        .iter()
        .enumerate()
        .filter_map(|(index, hit)| match normalize_candidate(hit, keys) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                warn!(index, error = %e, "Skipping catalog hit");
                None
            }
        })
        .collect();

    debug!(total, kept = candidates.len(), "Normalized catalog hits");
    candidates
}

/// Something a record can be merged with before saving
pub trait MergeSource {
    /// Value supplied for `field`, if any
    fn field_value(&self, field: TagField) -> Option<String>;

    /// Cover art URL supplied with the values
    fn thumbnail_url(&self) -> Option<String>;
}

impl MergeSource for RemoteCandidate {
    fn field_value(&self, field: TagField) -> Option<String> {
        match field {
            TagField::Title => self.title.clone(),
            TagField::Artist => self.artist.clone(),
            TagField::Album => self.album.clone(),
            TagField::Genre => self.genre.clone(),
            TagField::TrackNumber => self.tracknumber.as_ref().and_then(value_as_tag_text),
            TagField::DiscNumber => self.discnumber.as_ref().and_then(value_as_tag_text),
            TagField::AlbumArtist => self.albumartist.clone(),
            TagField::Composer => None,
            TagField::Year => Some(self.year.clone()).filter(|y| !y.is_empty()),
        }
    }

    fn thumbnail_url(&self) -> Option<String> {
        self.thumbnail().map(str::to_string)
    }
}

impl MergeSource for FieldEdits {
    fn field_value(&self, field: TagField) -> Option<String> {
        self.value(field).map(str::to_string)
    }

    fn thumbnail_url(&self) -> Option<String> {
        FieldEdits::thumbnail_url(self).map(str::to_string)
    }
}

/// Complete field set for writing: source value, else the record's value,
/// else an empty string.
pub fn merge_for_save(record: &TagRecord, source: &impl MergeSource) -> SaveFields {
    let mut fields = SaveFields::default();

    for field in TagField::ALL {
        let value = source
            .field_value(field)
            .or_else(|| record.get(field).map(str::to_string))
            .unwrap_or_default();
        *fields.slot(field) = match field {
            TagField::Year => date::truncate_year(&value),
            _ => value,
        };
    }
    fields.thumbnail_url = source.thumbnail_url();

    fields
}

/// Builds records from files and reconciles them with catalog results.
pub struct Reconciler {
    store: Arc<dyn TagStore>,
    search_fields: Vec<TagField>,
    catalog_keys: CatalogKeys,
    allowed_extensions: Vec<String>,
    span: Span,
}

impl Reconciler {
    /// Create a reconciler over a tag store with default settings
    pub fn new(store: Arc<dyn TagStore>) -> Self {
        Self {
            store,
            search_fields: TagField::DEFAULT_SEARCH_ORDER.to_vec(),
            catalog_keys: CatalogKeys::default(),
            allowed_extensions: vec!["mp3".to_string()],
            span: tracing::info_span!("reconciler"),
        }
    }

    /// Fields used for search terms, in order
    pub fn with_search_fields(mut self, fields: Vec<TagField>) -> Self {
        self.search_fields = fields;
        self
    }

    /// Key names used to read catalog hits
    pub fn with_catalog_keys(mut self, keys: CatalogKeys) -> Self {
        self.catalog_keys = keys;
        self
    }

    /// File extensions accepted by [`build_tag_record`](Self::build_tag_record)
    pub fn with_allowed_extensions(mut self, extensions: Vec<String>) -> Self {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Span every operation logs under
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Configured search field order
    pub fn search_fields(&self) -> &[TagField] {
        &self.search_fields
    }

    /// Reject paths that do not exist or are not an allowed audio file
    pub fn validate_path(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(SongInfoError::not_found(
                "File not found. Please check the path.",
            ));
        }

        let allowed = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.allowed_extensions.contains(&e.to_lowercase()))
            .unwrap_or(false);
        if !allowed {
            return Err(SongInfoError::not_found(format!(
                "Invalid file type. Only {} files are allowed.",
                self.allowed_extensions.join(", ").to_uppercase()
            )));
        }

        Ok(())
    }

    /// Read a file into a record.
    ///
    /// Tag extraction failures leave every field unset instead of failing.
    ///
    /// # Errors
    /// Returns `NotFound` if the path is missing or has a disallowed extension
    pub fn build_tag_record(&self, path: &Path) -> Result<TagRecord> {
        let _entered = self.span.enter();
        self.validate_path(path)?;
        Ok(read_or_empty(self.store.as_ref(), path))
    }

    /// Search terms for `record` using the configured field order
    pub fn search_terms(&self, record: &TagRecord) -> Vec<String> {
        derive_search_terms(record, &self.search_fields)
    }

    /// Normalize hits with the configured catalog key names
    pub fn normalize(&self, hits: Vec<RawHit>) -> Vec<RemoteCandidate> {
        let _entered = self.span.enter();
        normalize_candidates(hits, &self.catalog_keys)
    }

    /// Query the catalog for `record` and normalize what comes back.
    ///
    /// # Errors
    /// Propagates catalog failures such as `Unreachable`
    pub async fn find_candidates(
        &self,
        catalog: &dyn CatalogSearch,
        record: &TagRecord,
        limit: ResultsLimit,
    ) -> Result<Vec<RemoteCandidate>> {
        let terms = self.search_terms(record);
        async {
            debug!(terms = ?terms, limit = limit.get(), "Searching catalog");
            let hits = catalog.search(&terms, limit).await?;
            Ok(normalize_candidates(hits, &self.catalog_keys))
        }
        .instrument(self.span.clone())
        .await
    }

    /// Cover art currently embedded in the file, if it can be read
    pub fn current_artwork(&self, path: &Path) -> Option<ArtworkData> {
        let _entered = self.span.enter();
        match self.store.read_artwork(path) {
            Ok(artwork) => artwork,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No readable artwork");
                None
            }
        }
    }

    /// Write `fields` to the file and, if a thumbnail URL came with them,
    /// embed the downloaded cover art.
    ///
    /// Artwork failures are reported in the outcome and never undo the tag
    /// write.
    ///
    /// # Errors
    /// Returns `NotFound` for an invalid path and `SaveFailed` if the tags
    /// cannot be written
    pub async fn save(
        &self,
        path: &Path,
        fields: &SaveFields,
        artwork: Option<&dyn ArtworkSource>,
    ) -> Result<SaveOutcome> {
        async {
            self.validate_path(path)?;

            let (write_path, write_fields) = (path.to_path_buf(), fields.clone());
            self.blocking(move |store| store.write_tags(&write_path, &write_fields))
                .await
                .map_err(|e| match e {
                    SongInfoError::SaveFailed(_) => e,
                    other => SongInfoError::save_failed(other.to_string()),
                })?;
            info!(path = %path.display(), "Metadata saved");

            let thumbnail = fields
                .thumbnail_url
                .as_deref()
                .filter(|url| !url.trim().is_empty());
            let artwork = match (thumbnail, artwork) {
                (None, _) => ArtworkOutcome::NotRequested,
                (Some(_), None) => {
                    warn!("Thumbnail supplied but no artwork source is configured");
                    ArtworkOutcome::Failed("no artwork source configured".to_string())
                }
                (Some(url), Some(source)) => match self.embed_from(source, path, url).await {
                    Ok(()) => {
                        info!(path = %path.display(), "Thumbnail embedded");
                        ArtworkOutcome::Embedded
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Could not embed thumbnail");
                        ArtworkOutcome::Failed(e.to_string())
                    }
                },
            };

            let read_path = path.to_path_buf();
            let record = self
                .blocking(move |store| Ok(read_or_empty(store, &read_path)))
                .await?;
            Ok(SaveOutcome {
                artwork,
                metadata: record.view(),
            })
        }
        .instrument(self.span.clone())
        .await
    }

    async fn embed_from(&self, source: &dyn ArtworkSource, path: &Path, url: &str) -> Result<()> {
        debug!(url = %url, "Downloading thumbnail");
        let artwork = source.fetch(url).await?;
        let embed_path = path.to_path_buf();
        self.blocking(move |store| store.embed_artwork(&embed_path, &artwork))
            .await
            .map_err(|e| match e {
                SongInfoError::EmbedFailed(_) => e,
                other => SongInfoError::embed_failed(other.to_string()),
            })
    }

    /// Run tag file I/O on the blocking pool, under this reconciler's span
    async fn blocking<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn TagStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let span = self.span.clone();
        tokio::task::spawn_blocking(move || span.in_scope(|| work(store.as_ref())))
            .await
            .map_err(|e| SongInfoError::Io(std::io::Error::other(e)))?
    }
}

/// Read tags through `store`, degrading to an empty record on failure
fn read_or_empty(store: &dyn TagStore, path: &Path) -> TagRecord {
    let mut record = match store.read_tags(path) {
        Ok(record) => record,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Tag extraction failed, continuing with an empty record"
            );
            TagRecord::new()
        }
    };
    record.filepath = Some(path.to_path_buf());

    debug!(path = %path.display(), empty = record.is_empty(), "Built tag record");
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(value: Value) -> RawHit {
        match value {
            Value::Object(map) => map,
            _ => panic!("hit must be an object"),
        }
    }

    fn sample_hit() -> RawHit {
        hit(json!({
            "trackName": "Everything In Its Right Place",
            "artistName": "Radiohead",
            "collectionName": "Kid A",
            "primaryGenreName": "Alternative",
            "trackNumber": 1,
            "discNumber": 1,
            "releaseDate": "2000-10-02T07:00:00Z",
            "artworkUrl100": "https://is1.example.com/image/100x100bb.jpg"
        }))
    }

    #[test]
    fn overlay_overwrites_only_submitted_fields() {
        let mut record = TagRecord::new();
        record.set(TagField::Title, "Old");
        record.set(TagField::Genre, "Rock");

        let edits: FieldEdits = [("title", "New")].into_iter().collect();
        let report = overlay_fields(&mut record, &edits);

        assert_eq!(record.get(TagField::Title), Some("New"));
        assert_eq!(record.get(TagField::Genre), Some("Rock"));
        assert_eq!(report.applied, vec![TagField::Title]);
        assert!(report.unknown.is_empty());
    }

    #[test]
    fn overlay_empty_value_clears_to_empty_string() {
        let mut record = TagRecord::new();
        record.set(TagField::Genre, "Rock");

        let edits: FieldEdits = [("genre", "")].into_iter().collect();
        overlay_fields(&mut record, &edits);

        assert_eq!(record.get(TagField::Genre), Some(""));
    }

    #[test]
    fn overlay_reports_unknown_names() {
        let mut record = TagRecord::new();
        let edits: FieldEdits = [("lyrics", "la la"), ("artist", "A"), ("thumbnailUrl", "x")]
            .into_iter()
            .collect();

        let report = overlay_fields(&mut record, &edits);

        assert_eq!(report.unknown, vec!["lyrics".to_string()]);
        assert_eq!(report.applied, vec![TagField::Artist]);
        assert_eq!(record.get(TagField::Artist), Some("A"));
    }

    #[test]
    fn overlay_normalizes_date_alias() {
        let mut record = TagRecord::new();
        let edits: FieldEdits = [("date", "2001-05-01")].into_iter().collect();
        overlay_fields(&mut record, &edits);
        assert_eq!(record.year(), Some("2001"));
    }

    #[test]
    fn search_terms_skip_unset_and_empty() {
        let mut record = TagRecord::new();
        record.set(TagField::Title, "Song");
        record.set(TagField::Artist, "  ");

        let terms = derive_search_terms(&record, &TagField::DEFAULT_SEARCH_ORDER);
        assert_eq!(terms, vec!["Song".to_string()]);
    }

    #[test]
    fn search_terms_follow_configured_order() {
        let mut record = TagRecord::new();
        record.set(TagField::Title, "Song");
        record.set(TagField::Artist, "Band");
        record.set(TagField::Album, "Record");

        let terms = derive_search_terms(&record, &[TagField::Album, TagField::Title]);
        assert_eq!(terms, vec!["Record".to_string(), "Song".to_string()]);
    }

    #[test]
    fn normalize_maps_itunes_keys() {
        let candidate = normalize_candidate(&sample_hit(), &CatalogKeys::default()).unwrap();

        assert_eq!(candidate.title.as_deref(), Some("Everything In Its Right Place"));
        assert_eq!(candidate.artist.as_deref(), Some("Radiohead"));
        assert_eq!(candidate.albumartist.as_deref(), Some("Radiohead"));
        assert_eq!(candidate.album.as_deref(), Some("Kid A"));
        assert_eq!(candidate.genre.as_deref(), Some("Alternative"));
        assert_eq!(candidate.tracknumber, Some(json!(1)));
        assert_eq!(candidate.year, "2000");
    }

    #[test]
    fn release_date_with_zulu_suffix() {
        let mut raw = sample_hit();
        raw.insert("releaseDate".into(), json!("2025-06-27T00:00:00Z"));
        let candidate = normalize_candidate(&raw, &CatalogKeys::default()).unwrap();
        assert_eq!(candidate.year, "2025");
    }

    #[test]
    fn small_artwork_is_upgraded() {
        let raw = hit(json!({
            "releaseDate": "2025-06-27T00:00:00Z",
            "artworkUrl100": "https://is1.example.com/thumb/100x100bb.jpg"
        }));
        let candidate = normalize_candidate(&raw, &CatalogKeys::default()).unwrap();
        assert_eq!(
            candidate.thumbnail_url,
            "https://is1.example.com/thumb/1000x1000bb.jpg"
        );
    }

    #[test]
    fn large_artwork_is_preferred() {
        let mut raw = sample_hit();
        raw.insert(
            "artworkUrl1000".into(),
            json!("https://is1.example.com/custom/1000x1000.png"),
        );
        let candidate = normalize_candidate(&raw, &CatalogKeys::default()).unwrap();
        assert_eq!(
            candidate.thumbnail_url,
            "https://is1.example.com/custom/1000x1000.png"
        );
    }

    #[test]
    fn missing_artwork_is_empty() {
        let raw = hit(json!({ "releaseDate": "2025-06-27T00:00:00Z" }));
        let candidate = normalize_candidate(&raw, &CatalogKeys::default()).unwrap();
        assert!(candidate.thumbnail_url.is_empty());
    }

    #[test]
    fn bad_release_date_is_malformed() {
        let raw = hit(json!({ "trackName": "x", "releaseDate": "soon" }));
        let err = normalize_candidate(&raw, &CatalogKeys::default()).unwrap_err();
        assert!(matches!(err, SongInfoError::MalformedCandidate(_)));

        let raw = hit(json!({ "trackName": "x" }));
        let err = normalize_candidate(&raw, &CatalogKeys::default()).unwrap_err();
        assert!(matches!(err, SongInfoError::MalformedCandidate(_)));
    }

    #[test]
    fn one_bad_hit_does_not_lose_the_batch() {
        let mut bad = sample_hit();
        bad.insert("releaseDate".into(), json!("not a date"));

        let candidates =
            normalize_candidates(vec![sample_hit(), bad, sample_hit()], &CatalogKeys::default());
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn empty_batch_is_empty() {
        assert!(normalize_candidates(Vec::new(), &CatalogKeys::default()).is_empty());
    }

    #[test]
    fn custom_keys_are_honored() {
        let keys = CatalogKeys {
            track_name: "name".into(),
            release_date: "released".into(),
            ..CatalogKeys::default()
        };
        let raw = hit(json!({ "name": "Song", "released": "1990-01-01" }));
        let candidate = normalize_candidate(&raw, &keys).unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Song"));
        assert_eq!(candidate.year, "1990");
    }

    #[test]
    fn merge_prefers_candidate_then_record_then_empty() {
        let mut record = TagRecord::new();
        record.set(TagField::Composer, "Thom Yorke");
        record.set(TagField::Title, "Local title");

        let candidate = normalize_candidate(&sample_hit(), &CatalogKeys::default()).unwrap();
        let fields = merge_for_save(&record, &candidate);

        assert_eq!(fields.title, "Everything In Its Right Place");
        assert_eq!(fields.composer, "Thom Yorke");
        assert_eq!(fields.tracknumber, "1");
        assert_eq!(fields.year, "2000");
        assert_eq!(
            fields.thumbnail_url.as_deref(),
            Some("https://is1.example.com/image/1000x1000bb.jpg")
        );

        let fields = merge_for_save(&TagRecord::new(), &RemoteCandidate::default());
        assert_eq!(fields.title, "");
        assert_eq!(fields.year, "");
        assert!(fields.thumbnail_url.is_none());
    }

    #[test]
    fn merge_with_edits_keeps_explicit_empty_values() {
        let mut record = TagRecord::new();
        record.set(TagField::Genre, "Rock");
        record.set(TagField::Album, "Kept");

        let edits: FieldEdits = [("genre", ""), ("date", "1994-03-08"), ("thumbnailUrl", "")]
            .into_iter()
            .collect();
        let fields = merge_for_save(&record, &edits);

        assert_eq!(fields.genre, "");
        assert_eq!(fields.album, "Kept");
        assert_eq!(fields.year, "1994");
        assert!(fields.thumbnail_url.is_none());
    }

    #[test]
    fn year_and_date_spellings_resolve_alike_in_overlay_and_merge() {
        let edits: FieldEdits = [("date", "1991-01-01"), ("year", "2004")]
            .into_iter()
            .collect();

        let mut record = TagRecord::new();
        overlay_fields(&mut record, &edits);
        let fields = merge_for_save(&TagRecord::new(), &edits);

        assert_eq!(record.year(), Some(fields.year.as_str()));
        assert_eq!(fields.year, "2004");
    }
}
