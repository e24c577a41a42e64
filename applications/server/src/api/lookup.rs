/// Lookup API route
use crate::{
    api::{blocking, require_path},
    error::Result,
    middleware::Session,
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use songinfo_core::{overlay_fields, FieldEdits, RemoteCandidate, TagRecordView};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub filepath: String,
    /// Edits to apply over the file's tags before searching
    #[serde(default)]
    pub fields: Option<FieldEdits>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub metadata: TagRecordView,
    pub results: Vec<RemoteCandidate>,
    pub search_terms: Vec<String>,
    pub unknown_fields: Vec<String>,
    /// Embedded cover as a `data:` URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_artwork: Option<String>,
}

/// POST /api/lookup
/// Read a file's tags, optionally overlay edits, and search the catalog
pub async fn lookup(
    State(app_state): State<AppState>,
    session: Session,
    Json(request): Json<LookupRequest>,
) -> Result<(Session, Json<LookupResponse>)> {
    let path = require_path(&request.filepath)?;

    let reconciler = Arc::clone(&app_state.reconciler);
    let (mut record, current_artwork) = blocking(move || {
        let record = reconciler.build_tag_record(&path)?;
        let artwork = reconciler.current_artwork(&path);
        Ok((record, artwork))
    })
    .await?;

    let unknown_fields = match &request.fields {
        Some(edits) => overlay_fields(&mut record, edits).unknown,
        None => Vec::new(),
    };

    let limit = app_state.sessions.results_limit(session.id()).await;
    let results = app_state
        .reconciler
        .find_candidates(app_state.catalog.as_ref(), &record, limit)
        .await?;

    tracing::info!(
        path = %request.filepath,
        results = results.len(),
        limit = limit.get(),
        "Lookup complete"
    );

    Ok((
        session,
        Json(LookupResponse {
            metadata: record.view(),
            search_terms: app_state.reconciler.search_terms(&record),
            results,
            unknown_fields,
            current_artwork: current_artwork.map(|art| art.to_data_url()),
        }),
    ))
}
