/// Artist API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use songinfo_core::RawHit;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistMusicResponse {
    pub artist_id: String,
    pub results: Vec<RawHit>,
}

/// GET /api/artists/:id/music
pub async fn artist_music(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<ArtistMusicResponse>> {
    let results = app_state.catalog.music_by_artist(&id).await?;
    Ok(Json(ArtistMusicResponse {
        artist_id: id,
        results,
    }))
}
