/// Save API route
use crate::{
    api::{blocking, require_path},
    error::Result,
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use songinfo_core::{merge_for_save, ArtworkOutcome, FieldEdits, TagRecordView};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub filepath: String,
    #[serde(default)]
    pub fields: FieldEdits,
    /// Cover art to download and embed
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub artwork: ArtworkOutcome,
    pub metadata: TagRecordView,
}

fn message_for(artwork: &ArtworkOutcome) -> &'static str {
    match artwork {
        ArtworkOutcome::NotRequested => "Metadata saved successfully.",
        ArtworkOutcome::Embedded => "Metadata and thumbnail saved successfully.",
        ArtworkOutcome::Failed(_) => "Metadata saved, but the thumbnail could not be embedded.",
    }
}

/// POST /api/save
/// Merge submitted fields over the file's tags and write them back
pub async fn save(
    State(app_state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>> {
    let path = require_path(&request.filepath)?;

    let reconciler = Arc::clone(&app_state.reconciler);
    let read_path = path.clone();
    let record = blocking(move || reconciler.build_tag_record(&read_path)).await?;

    let mut edits = request.fields;
    if let Some(url) = request.thumbnail_url {
        edits.insert(FieldEdits::THUMBNAIL_KEY, url);
    }
    let fields = merge_for_save(&record, &edits);

    let outcome = app_state
        .reconciler
        .save(&path, &fields, app_state.artwork.as_deref())
        .await?;

    Ok(Json(SaveResponse {
        success: true,
        message: message_for(&outcome.artwork).to_string(),
        artwork: outcome.artwork,
        metadata: outcome.metadata,
    }))
}
