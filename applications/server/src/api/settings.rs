/// Settings API routes
use crate::{middleware::Session, state::AppState};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use songinfo_core::ResultsLimit;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub results_limit: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    /// Number or numeric text; anything else falls back to the default
    #[serde(default)]
    pub results_limit: Option<Value>,
}

/// GET /api/settings
pub async fn get_settings(
    State(app_state): State<AppState>,
    session: Session,
) -> (Session, Json<SettingsResponse>) {
    let limit = app_state.sessions.results_limit(session.id()).await;
    (
        session,
        Json(SettingsResponse {
            results_limit: limit.get(),
        }),
    )
}

/// PUT /api/settings
pub async fn update_settings(
    State(app_state): State<AppState>,
    session: Session,
    Json(update): Json<SettingsUpdate>,
) -> (Session, Json<SettingsResponse>) {
    let raw = update.results_limit.and_then(|value| match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        _ => None,
    });
    let limit = ResultsLimit::parse_or(raw.as_deref(), app_state.sessions.default_limit());

    app_state
        .sessions
        .set_results_limit(session.id(), limit)
        .await;

    (
        session,
        Json(SettingsResponse {
            results_limit: limit.get(),
        }),
    )
}
