use axum::{
    Router,
    http::{HeaderValue, header},
    response::IntoResponse,
    routing::{get, post},
};
use log::info;
use tower_http::set_header::SetResponseHeaderLayer;
use walkup_server_domain::{ServiceError, app::AppState, player::Player};

mod lineup;
mod public;
mod roster;

pub async fn run(
    app: AppState,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) {
    // The public projection must never be served stale; pin no-store on the
    // whole share-link surface so intermediaries cannot cache it.
    let public_router = Router::new()
        .route("/public/{share_id}", get(public::get_public_lineup))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    let router = Router::new()
        .route(
            "/teams/{team_id}/lineup",
            get(lineup::get_lineup).put(lineup::put_lineup),
        )
        .route("/teams/{team_id}/players", post(roster::create_player))
        .route(
            "/players/{player_id}",
            axum::routing::patch(roster::update_player).delete(roster::delete_player),
        )
        .merge(public_router);

    let port = std::env::var("WALKUP_HTTP_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .expect("WALKUP_HTTP_PORT must be a valid u16");

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .unwrap();

    info!("API server listening on port {}", port);
    axum::serve(listener, router.with_state(app))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .unwrap();

    info!("HTTP API shut down gracefully");
}

pub struct ApiError(ServiceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::http::Response<axum::body::Body> {
        let (status, msg) = match self.0 {
            ServiceError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            ServiceError::BadRequest(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            ServiceError::Forbidden(msg) => (axum::http::StatusCode::FORBIDDEN, msg),
            e @ ServiceError::PartialWrite { .. } => {
                (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ServiceError::Other(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            ServiceError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({ "error": msg });
        (status, axum::Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        ApiError(value)
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPlayerResponse {
    id: uuid::Uuid,
    first_name: String,
    last_name: String,
    jersey_number: Option<i32>,
    song_reference: Option<String>,
    song_title: Option<String>,
    song_artist: Option<String>,
    artwork_url: Option<String>,
    start_offset_ms: Option<i64>,
    batting_order: i64,
    is_active: bool,
}

impl From<Player> for JsonPlayerResponse {
    fn from(player: Player) -> Self {
        let song = player.song;
        Self {
            id: player.id,
            first_name: player.first_name,
            last_name: player.last_name,
            jersey_number: player.jersey_number,
            song_reference: song.as_ref().map(|s| s.uri.clone()),
            song_title: song.as_ref().map(|s| s.title.clone()),
            song_artist: song.as_ref().map(|s| s.artist.clone()),
            artwork_url: song.as_ref().and_then(|s| s.artwork_url.clone()),
            start_offset_ms: song.as_ref().map(|s| s.start_offset_ms),
            batting_order: player.batting_order,
            is_active: player.is_active,
        }
    }
}

fn validate_body<T: validator::Validate>(body: &T) -> Result<(), ApiError> {
    body.validate()
        .map_err(|e| ApiError(ServiceError::BadRequest(format!("Invalid request: {}", e))))
}
