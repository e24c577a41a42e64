//! Song Info Finder Catalog
//!
//! HTTP client for the iTunes Search API, the remote catalog Song Info
//! Finder matches local files against.
//!
//! # Features
//!
//! - **Track search**: ordered terms, capped result count
//! - **Artist lookup**: songs and albums of a catalog artist
//! - **Error classification**: unreachable catalog kept distinct from
//!   empty results
//!
//! # Example
//!
//! ```ignore
//! use songinfo_catalog::{CatalogConfig, ItunesClient};
//! use songinfo_core::{CatalogSearch, ResultsLimit};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ItunesClient::new(CatalogConfig::default())?;
//!     let terms = vec!["Teardrop".to_string(), "Massive Attack".to_string()];
//!     let hits = client.search(&terms, ResultsLimit::DEFAULT).await?;
//!     println!("Found {} hits", hits.len());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::ItunesClient;
pub use error::{CatalogError, Result};
pub use types::{CatalogConfig, SearchResponse, DEFAULT_BASE_URL};
