use std::sync::Arc;

use log::info;
use walkup_persistence_sqlite::{
    create_db_pool, players::SqlitePlayerRepository, teams::SqliteTeamRepository,
};
use walkup_server_domain::{
    app::construct_app,
    player::ArcPlayerRepository,
    team::ArcTeamRepository,
};

mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    logs::init_logger();

    let pool = create_db_pool();
    let player_repository: ArcPlayerRepository =
        Arc::new(Box::new(SqlitePlayerRepository::new(pool.clone())));
    let team_repository: ArcTeamRepository =
        Arc::new(Box::new(SqliteTeamRepository::new(pool)));

    let app = construct_app(player_repository, team_repository);

    info!("Starting walkup server");
    walkup_server_http_api::run(app, shutdown_signal()).await;
}
