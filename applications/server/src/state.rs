/// Shared application state
use crate::{config::ServerConfig, error::ServerError, services::SessionStore};
use songinfo_artwork::ArtworkFetcher;
use songinfo_catalog::{CatalogConfig, ItunesClient};
use songinfo_core::{ArtworkSource, CatalogSearch, Reconciler};
use songinfo_metadata::LoftyTagStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
    pub catalog: Arc<dyn CatalogSearch>,
    pub artwork: Option<Arc<dyn ArtworkSource>>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(
        reconciler: Arc<Reconciler>,
        catalog: Arc<dyn CatalogSearch>,
        artwork: Option<Arc<dyn ArtworkSource>>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            reconciler,
            catalog,
            artwork,
            sessions,
        }
    }

    /// Wire the lofty tag store, iTunes client, and artwork fetcher
    pub fn from_config(config: &ServerConfig) -> crate::error::Result<Self> {
        let reconciler = Reconciler::new(Arc::new(LoftyTagStore::new()))
            .with_search_fields(config.search_fields()?)
            .with_catalog_keys(config.catalog.keys.clone())
            .with_allowed_extensions(config.search.allowed_extensions.clone())
            .with_span(tracing::info_span!("songinfo"));

        let catalog = ItunesClient::new(
            CatalogConfig::new(config.catalog.base_url.clone())
                .with_timeout(config.catalog_timeout()),
        )
        .map_err(|e| ServerError::Config(e.to_string()))?;

        let artwork: Option<Arc<dyn ArtworkSource>> = if config.artwork.enabled {
            let fetcher = ArtworkFetcher::new(config.artwork_timeout())
                .map_err(|e| ServerError::Config(e.to_string()))?
                .with_max_size(config.artwork.max_size_bytes);
            Some(Arc::new(fetcher))
        } else {
            None
        };

        let sessions = SessionStore::new(config.default_results_limit()?);

        Ok(Self::new(
            Arc::new(reconciler),
            Arc::new(catalog),
            artwork,
            Arc::new(sessions),
        ))
    }
}
