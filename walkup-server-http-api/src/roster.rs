use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use validator::Validate;
use walkup_server_domain::{
    app::AppState,
    player::{NewPlayer, PlayerProfileUpdate, SongSelection},
};

use crate::{ApiError, JsonPlayerResponse, validate_body};

#[derive(serde::Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JsonSongSelection {
    #[validate(length(min = 1, max = 200))]
    song_reference: String,
    #[validate(length(max = 200))]
    song_title: String,
    #[validate(length(max = 200))]
    song_artist: String,
    artwork_url: Option<String>,
    #[validate(range(min = 0))]
    start_offset_ms: i64,
}

impl From<JsonSongSelection> for SongSelection {
    fn from(song: JsonSongSelection) -> Self {
        SongSelection {
            uri: song.song_reference,
            title: song.song_title,
            artist: song.song_artist,
            artwork_url: song.artwork_url,
            start_offset_ms: song.start_offset_ms,
        }
    }
}

#[derive(serde::Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JsonCreatePlayerRequest {
    #[validate(length(min = 1, max = 50))]
    first_name: String,
    #[validate(length(max = 50))]
    last_name: Option<String>,
    #[validate(range(min = 0, max = 999))]
    jersey_number: Option<i32>,
    #[validate(nested)]
    song: Option<JsonSongSelection>,
}

pub async fn create_player(
    Path(team_id): Path<Uuid>,
    State(app_state): State<AppState>,
    Json(body): Json<JsonCreatePlayerRequest>,
) -> Result<Json<JsonPlayerResponse>, ApiError> {
    validate_body(&body)?;
    let new_player = NewPlayer {
        first_name: body.first_name,
        last_name: body.last_name.unwrap_or_default(),
        jersey_number: body.jersey_number,
        song: body.song.map(Into::into),
    };
    let player = app_state
        .roster_service
        .add_player(team_id, new_player)
        .await?;
    Ok(Json(player.into()))
}

#[derive(serde::Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JsonUpdatePlayerRequest {
    #[validate(length(min = 1, max = 50))]
    first_name: Option<String>,
    #[validate(length(max = 50))]
    last_name: Option<String>,
    #[validate(range(min = 0, max = 999))]
    jersey_number: Option<i32>,
    #[validate(nested)]
    song: Option<JsonSongSelection>,
}

pub async fn update_player(
    Path(player_id): Path<Uuid>,
    State(app_state): State<AppState>,
    Json(body): Json<JsonUpdatePlayerRequest>,
) -> Result<Json<JsonPlayerResponse>, ApiError> {
    validate_body(&body)?;
    let update = PlayerProfileUpdate {
        first_name: body.first_name,
        last_name: body.last_name,
        jersey_number: body.jersey_number,
        song: body.song.map(Into::into),
    };
    let player = app_state
        .roster_service
        .update_player(player_id, update)
        .await?;
    Ok(Json(player.into()))
}

pub async fn delete_player(
    Path(player_id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    app_state.roster_service.remove_player(player_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
