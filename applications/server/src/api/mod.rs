/// API route modules
pub mod artists;
pub mod health;
pub mod lookup;
pub mod save;
pub mod settings;

use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

/// All `/api` routes, without middleware
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/lookup", post(lookup::lookup))
        .route("/save", post(save::save))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route("/artists/:id/music", get(artists::artist_music))
}

/// Run tag file I/O off the async runtime
pub(crate) async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> songinfo_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .map_err(ServerError::from)
}

/// Reject blank paths before touching the file system
pub(crate) fn require_path(filepath: &str) -> Result<std::path::PathBuf> {
    let trimmed = filepath.trim();
    if trimmed.is_empty() {
        return Err(ServerError::BadRequest(
            "Please enter a file path.".to_string(),
        ));
    }
    Ok(std::path::PathBuf::from(trimmed))
}
