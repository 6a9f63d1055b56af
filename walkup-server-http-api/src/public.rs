use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use walkup_server_domain::{app::AppState, projection::PublicPlayer};

use crate::ApiError;

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPublicLineupResponse {
    team_name: String,
    players: Vec<JsonPublicPlayer>,
    warmup_available: bool,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPublicPlayer {
    id: Uuid,
    player_number: Option<i32>,
    display_name: String,
    song_reference: Option<String>,
    song_title: Option<String>,
    song_artist: Option<String>,
    artwork_url: Option<String>,
    start_offset_ms: Option<i64>,
}

impl From<PublicPlayer> for JsonPublicPlayer {
    fn from(player: PublicPlayer) -> Self {
        let song = player.song;
        Self {
            id: player.id,
            player_number: player.jersey_number,
            display_name: player.display_name,
            song_reference: song.as_ref().map(|s| s.uri.clone()),
            song_title: song.as_ref().map(|s| s.title.clone()),
            song_artist: song.as_ref().map(|s| s.artist.clone()),
            artwork_url: song.as_ref().and_then(|s| s.artwork_url.clone()),
            start_offset_ms: song.as_ref().map(|s| s.start_offset_ms),
        }
    }
}

pub async fn get_public_lineup(
    Path(share_id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonPublicLineupResponse>, ApiError> {
    let projection = app_state
        .projection_service
        .get_public_lineup(share_id)
        .await?;
    Ok(Json(JsonPublicLineupResponse {
        team_name: projection.team_name,
        players: projection.players.into_iter().map(Into::into).collect(),
        warmup_available: projection.warmup_available,
    }))
}
