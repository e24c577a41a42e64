/// Common test utilities and fixtures
use async_trait::async_trait;
use serde_json::Value;
use songinfo_core::{
    ArtworkData, ArtworkSource, CatalogSearch, RawHit, Reconciler, ResultsLimit, SongInfoError,
};
use songinfo_metadata::LoftyTagStore;
use songinfo_server::{AppState, SessionStore};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, no padding
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
const FRAME_LEN: usize = 417;

/// Write about a second of silent MP3 frames without any tags
pub fn silent_mp3(dir: &TempDir, name: &str) -> PathBuf {
    let mut bytes = Vec::with_capacity(FRAME_LEN * 40);
    for _ in 0..40 {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..4].copy_from_slice(&FRAME_HEADER);
        bytes.extend_from_slice(&frame);
    }
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Catalog returning canned hits and recording the last query
pub struct FakeCatalog {
    hits: Vec<RawHit>,
    pub last_terms: Mutex<Vec<String>>,
    pub last_limit: Mutex<Option<usize>>,
}

impl FakeCatalog {
    pub fn new(hits: Vec<Value>) -> Self {
        Self {
            hits: hits
                .into_iter()
                .filter_map(|hit| hit.as_object().cloned())
                .collect(),
            last_terms: Mutex::new(Vec::new()),
            last_limit: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CatalogSearch for FakeCatalog {
    async fn search(
        &self,
        terms: &[String],
        limit: ResultsLimit,
    ) -> songinfo_core::Result<Vec<RawHit>> {
        *self.last_terms.lock().unwrap() = terms.to_vec();
        *self.last_limit.lock().unwrap() = Some(limit.get());
        Ok(self.hits.iter().take(limit.get()).cloned().collect())
    }

    async fn music_by_artist(&self, artist_id: &str) -> songinfo_core::Result<Vec<RawHit>> {
        if artist_id == "42" {
            Ok(self.hits.clone())
        } else {
            Err(SongInfoError::invalid_input(format!("unknown artist {}", artist_id)))
        }
    }
}

/// Catalog that is never reachable
pub struct OfflineCatalog;

#[async_trait]
impl CatalogSearch for OfflineCatalog {
    async fn search(
        &self,
        _terms: &[String],
        _limit: ResultsLimit,
    ) -> songinfo_core::Result<Vec<RawHit>> {
        Err(SongInfoError::Unreachable("connection refused".into()))
    }
}

/// Artwork source serving a fixed JPEG
pub struct FixedArtwork;

#[async_trait]
impl ArtworkSource for FixedArtwork {
    async fn fetch(&self, _url: &str) -> songinfo_core::Result<ArtworkData> {
        Ok(ArtworkData::jpeg(vec![0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xD9]))
    }
}

/// App state over the real lofty tag store and the given catalog
pub fn test_state(catalog: Arc<dyn CatalogSearch>) -> AppState {
    let reconciler = Reconciler::new(Arc::new(LoftyTagStore::new()));
    AppState::new(
        Arc::new(reconciler),
        catalog,
        Some(Arc::new(FixedArtwork)),
        Arc::new(SessionStore::new(ResultsLimit::DEFAULT)),
    )
}

pub fn itunes_hit(title: &str) -> Value {
    serde_json::json!({
        "trackName": title,
        "artistName": "Boards of Canada",
        "collectionName": "Music Has the Right to Children",
        "primaryGenreName": "Electronic",
        "trackNumber": 2,
        "discNumber": 1,
        "releaseDate": "1998-04-20T07:00:00Z",
        "artworkUrl100": "https://is1.example.com/art/100x100bb.jpg"
    })
}
