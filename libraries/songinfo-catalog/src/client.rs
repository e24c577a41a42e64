//! iTunes Search API client.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogConfig, SearchResponse};
use async_trait::async_trait;
use reqwest::Client;
use songinfo_core::{CatalogSearch, RawHit, ResultsLimit};
use tracing::{debug, info, warn};
use url::Url;

/// Client for the iTunes Search API.
///
/// Every call is a single attempt bounded by the configured timeout.
///
/// # Example
///
/// ```ignore
/// use songinfo_catalog::{CatalogConfig, ItunesClient};
/// use songinfo_core::ResultsLimit;
///
/// let client = ItunesClient::new(CatalogConfig::default())?;
/// let hits = client
///     .search_tracks(&["Teardrop".to_string()], ResultsLimit::DEFAULT)
///     .await?;
/// println!("Found {} tracks", hits.len());
/// ```
pub struct ItunesClient {
    http: Client,
    base_url: String,
}

impl ItunesClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("SongInfoFinder/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Get the catalog base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for tracks matching the ordered terms.
    ///
    /// Returns at most `limit` raw hits. An empty term list returns nothing
    /// without contacting the catalog.
    pub async fn search_tracks(&self, terms: &[String], limit: ResultsLimit) -> Result<Vec<RawHit>> {
        if terms.is_empty() {
            debug!("No search terms, skipping catalog request");
            return Ok(Vec::new());
        }

        let term = terms.join(" ");
        let limit_param = limit.get().to_string();
        let url = format!("{}/search", self.base_url);
        debug!(url = %url, term = %term, limit = limit.get(), "Searching catalog");

        let mut results = self
            .get(
                &url,
                &[
                    ("term", term.as_str()),
                    ("entity", "musicTrack"),
                    ("limit", limit_param.as_str()),
                ],
            )
            .await?;
        results.truncate(limit.get());

        info!(term = %term, count = results.len(), "Catalog search complete");
        Ok(results)
    }

    /// Songs and albums of an artist, by catalog artist id.
    ///
    /// Results of both lookups are concatenated; a lookup that fails is
    /// logged and skipped unless both fail.
    pub async fn music_by_artist(&self, artist_id: &str) -> Result<Vec<RawHit>> {
        let artist_id = artist_id.trim();
        if artist_id.is_empty() || !artist_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(CatalogError::InvalidArtistId(artist_id.to_string()));
        }

        let url = format!("{}/lookup", self.base_url);
        let mut music = Vec::new();
        let mut last_error = None;
        let mut succeeded = false;

        for entity in ["song", "album"] {
            match self.get(&url, &[("id", artist_id), ("entity", entity)]).await {
                Ok(results) => {
                    debug!(artist_id, entity, count = results.len(), "Artist lookup");
                    music.extend(results);
                    succeeded = true;
                }
                Err(e) => {
                    warn!(artist_id, entity, error = %e, "Artist lookup failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !succeeded => Err(e),
            _ => Ok(music),
        }
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<RawHit>> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(CatalogError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await.map_err(CatalogError::from_send)?;
            let parsed: SearchResponse = serde_json::from_slice(&body).map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse catalog response: {}", e))
            })?;
            debug!(
                reported = parsed.result_count,
                received = parsed.results.len(),
                "Catalog response"
            );
            Ok(parsed.results)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl CatalogSearch for ItunesClient {
    async fn search(
        &self,
        terms: &[String],
        limit: ResultsLimit,
    ) -> songinfo_core::Result<Vec<RawHit>> {
        Ok(self.search_tracks(terms, limit).await?)
    }

    async fn music_by_artist(&self, artist_id: &str) -> songinfo_core::Result<Vec<RawHit>> {
        Ok(ItunesClient::music_by_artist(self, artist_id).await?)
    }
}
