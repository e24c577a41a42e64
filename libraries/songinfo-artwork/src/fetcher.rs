use crate::convert;
use crate::error::{ArtworkError, Result};
use async_trait::async_trait;
use reqwest::Client;
use songinfo_core::{ArtworkData, ArtworkSource};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Maximum artwork size (5MB)
pub const MAX_ARTWORK_SIZE: usize = 5 * 1024 * 1024;

/// Downloads cover art and prepares it for embedding
pub struct ArtworkFetcher {
    http: Client,
    max_size: usize,
}

impl ArtworkFetcher {
    /// Create a fetcher with the given whole-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!("SongInfoFinder/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            max_size: MAX_ARTWORK_SIZE,
        })
    }

    /// Override the download size limit
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Download the image behind `url` and convert it to JPEG if needed
    pub async fn download(&self, url: &str) -> Result<ArtworkData> {
        let parsed = Url::parse(url).map_err(|e| ArtworkError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ArtworkError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        debug!(url = %parsed, "Downloading artwork");
        let mut response = self.http.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtworkError::Status(status.as_u16()));
        }

        if let Some(length) = response.content_length() {
            let length = length as usize;
            if length > self.max_size {
                return Err(ArtworkError::TooLarge(length, self.max_size));
            }
        }

        // Content-Length is advisory
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_size {
                return Err(ArtworkError::TooLarge(bytes.len() + chunk.len(), self.max_size));
            }
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            return Err(ArtworkError::Empty);
        }

        let artwork = convert::to_jpeg(bytes)?;
        info!(bytes = artwork.data.len(), "Artwork downloaded");
        Ok(artwork)
    }
}

#[async_trait]
impl ArtworkSource for ArtworkFetcher {
    async fn fetch(&self, url: &str) -> songinfo_core::Result<ArtworkData> {
        Ok(self.download(url).await?)
    }
}
