//! Types used by the catalog client.

use serde::{Deserialize, Serialize};
use songinfo_core::RawHit;
use std::time::Duration;

/// Default public catalog endpoint
pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// Catalog connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog (e.g., "https://itunes.apple.com")
    pub base_url: String,
    /// Whole-request timeout
    #[serde(with = "secs")]
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Create a config for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// Envelope of every search and lookup response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Number of results the catalog reports
    #[serde(default)]
    pub result_count: usize,
    /// Raw result objects
    #[serde(default)]
    pub results: Vec<RawHit>,
}
