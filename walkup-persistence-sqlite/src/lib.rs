use sqlx::{Pool, Sqlite, sqlite::SqlitePoolOptions};

pub mod players;
pub mod teams;

pub fn create_db_pool() -> Pool<Sqlite> {
    let db_url = std::env::var("WALKUP_DB_URL").expect("WALKUP_DB_URL must be set");
    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_lazy(&db_url)
        .expect("Failed to create database pool")
}

fn map_string_to_option(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
