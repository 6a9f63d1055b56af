use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use walkup_server_domain::app::AppState;

use crate::{ApiError, JsonPlayerResponse};

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLineupResponse {
    active: Vec<JsonPlayerResponse>,
    inactive: Vec<JsonPlayerResponse>,
}

pub async fn get_lineup(
    Path(team_id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonLineupResponse>, ApiError> {
    let lineup = app_state.lineup_service.get_lineup(team_id).await?;
    Ok(Json(JsonLineupResponse {
        active: lineup.active.into_iter().map(Into::into).collect(),
        inactive: lineup.inactive.into_iter().map(Into::into).collect(),
    }))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReconcileRequest {
    active_players: Vec<Uuid>,
    inactive_players: Vec<Uuid>,
}

pub async fn put_lineup(
    Path(team_id): Path<Uuid>,
    State(app_state): State<AppState>,
    Json(body): Json<JsonReconcileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    app_state
        .lineup_service
        .reconcile(team_id, body.active_players, body.inactive_players)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
