/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use songinfo_core::{CatalogKeys, ResultsLimit, TagField};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_artwork")]
    pub artwork: ArtworkSettings,

    #[serde(default = "default_search")]
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Key names of the catalog's result objects
    #[serde(default)]
    pub keys: CatalogKeys,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtworkSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_artwork_bytes")]
    pub max_size_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchSettings {
    /// Tag fields joined into the catalog query, in order
    #[serde(default = "default_search_fields")]
    pub fields: Vec<String>,

    /// Results limit for sessions that have not chosen one
    #[serde(default = "default_results_limit")]
    pub results_limit: usize,

    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `config.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (SONGINFO__SERVER__PORT=8080)
        settings = settings.add_source(
            config::Environment::with_prefix("SONGINFO")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("search.fields")
                .with_list_parse_key("search.allowed_extensions")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.search_fields()?;
        self.default_results_limit()?;

        if self.search.allowed_extensions.is_empty() {
            return Err(ServerError::Config(
                "At least one allowed file extension is required".to_string(),
            ));
        }

        let url = self.catalog.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerError::Config(format!(
                "Catalog URL must start with http:// or https:// (got {:?})",
                url
            )));
        }

        Ok(())
    }

    /// Configured search fields, parsed
    pub fn search_fields(&self) -> Result<Vec<TagField>> {
        if self.search.fields.is_empty() {
            return Err(ServerError::Config(
                "At least one search field is required".to_string(),
            ));
        }

        self.search
            .fields
            .iter()
            .map(|name| {
                name.parse::<TagField>()
                    .map_err(|_| ServerError::Config(format!("Unknown search field: {}", name)))
            })
            .collect()
    }

    /// Results limit for new sessions
    pub fn default_results_limit(&self) -> Result<ResultsLimit> {
        ResultsLimit::new(self.search.results_limit).ok_or_else(|| {
            ServerError::Config("Results limit must be at least 1".to_string())
        })
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_secs)
    }

    pub fn artwork_timeout(&self) -> Duration {
        Duration::from_secs(self.artwork.timeout_secs)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        base_url: default_catalog_url(),
        timeout_secs: default_timeout_secs(),
        keys: CatalogKeys::default(),
    }
}

fn default_catalog_url() -> String {
    songinfo_catalog::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_artwork() -> ArtworkSettings {
    ArtworkSettings {
        enabled: default_enabled(),
        timeout_secs: default_timeout_secs(),
        max_size_bytes: default_max_artwork_bytes(),
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_artwork_bytes() -> usize {
    songinfo_artwork::MAX_ARTWORK_SIZE
}

fn default_search() -> SearchSettings {
    SearchSettings {
        fields: default_search_fields(),
        results_limit: default_results_limit(),
        allowed_extensions: default_allowed_extensions(),
    }
}

fn default_search_fields() -> Vec<String> {
    TagField::DEFAULT_SEARCH_ORDER
        .iter()
        .map(|field| field.as_str().to_string())
        .collect()
}

fn default_results_limit() -> usize {
    ResultsLimit::DEFAULT.get()
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["mp3".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            catalog: default_catalog(),
            artwork: default_artwork(),
            search: default_search(),
        }
    }
}
