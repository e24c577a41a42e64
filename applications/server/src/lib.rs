//! Song Info Finder Server Library
//!
//! HTTP front end for Song Info Finder: look up an MP3's tags, search the
//! catalog for matching releases, and write the chosen metadata back.
//!
//! This library exposes the router and its components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::SessionStore;
pub use state::AppState;

/// Full application router with tracing and CORS layers
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", api::routes())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
