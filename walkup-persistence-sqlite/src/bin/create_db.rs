use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const TEAMS_SQL: &str = "CREATE TABLE IF NOT EXISTS teams (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    share_id TEXT NOT NULL UNIQUE,
    tier TEXT NOT NULL DEFAULT 'free',
    warmup_playlist TEXT NOT NULL DEFAULT ''
);";

const PLAYERS_SQL: &str = "CREATE TABLE IF NOT EXISTS players (
    id TEXT PRIMARY KEY,
    team_id TEXT NOT NULL REFERENCES teams(id),
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL DEFAULT '',
    jersey_number INTEGER,
    song_uri TEXT NOT NULL DEFAULT '',
    song_title TEXT NOT NULL DEFAULT '',
    song_artist TEXT NOT NULL DEFAULT '',
    song_artwork_url TEXT NOT NULL DEFAULT '',
    song_start_offset_ms INTEGER NOT NULL DEFAULT 0,
    batting_order INTEGER NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1
);
CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id);";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let db_path = std::env::var("WALKUP_DB_PATH").expect("WALKUP_DB_PATH env var not set");
    let parent = std::path::Path::new(&db_path)
        .parent()
        .expect("Failed to get parent directory of DB path");
    if !parent.exists() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory for DB");
        println!("Created parent directory for DB at {}", parent.display());
    }

    let connect_options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options)
        .await
        .expect("Failed to create pool");

    sqlx::raw_sql(TEAMS_SQL)
        .execute(&pool)
        .await
        .expect("Failed to create teams table");
    sqlx::raw_sql(PLAYERS_SQL)
        .execute(&pool)
        .await
        .expect("Failed to create players table");

    println!("Created schema in DB at {}", db_path);
}
