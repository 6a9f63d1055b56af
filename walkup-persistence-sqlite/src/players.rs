use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};
use uuid::Uuid;
use walkup_server_domain::{
    ServiceError, ServiceResult,
    player::{Player, PlayerId, PlayerProfileUpdate, PlayerRepository, SongSelection},
    team::TeamId,
};

use crate::map_string_to_option;

pub struct SqlitePlayerRepository {
    pool: Pool<Sqlite>,
}

impl SqlitePlayerRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn player_from_row(row: &SqliteRow) -> sqlx::Result<Player> {
        let song_uri: String = row.try_get("song_uri")?;
        let song = map_string_to_option(song_uri).map(|uri| {
            Ok::<_, sqlx::Error>(SongSelection {
                uri,
                title: row.try_get("song_title")?,
                artist: row.try_get("song_artist")?,
                artwork_url: map_string_to_option(row.try_get("song_artwork_url")?),
                start_offset_ms: row.try_get("song_start_offset_ms")?,
            })
        });
        let song = match song {
            Some(result) => Some(result?),
            None => None,
        };
        Ok(Player {
            id: parse_uuid_column(row, "id")?,
            team_id: parse_uuid_column(row, "team_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            jersey_number: row.try_get("jersey_number")?,
            song,
            batting_order: row.try_get("batting_order")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

pub(crate) fn parse_uuid_column(row: &SqliteRow, column: &str) -> sqlx::Result<Uuid> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

#[async_trait::async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn get_player_by_id(&self, id: PlayerId) -> ServiceResult<Option<Player>> {
        let row = sqlx::query("SELECT * FROM players WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        match row {
            Some(row) => Self::player_from_row(&row)
                .map(Some)
                .map_err(|e| ServiceError::Internal(e.to_string())),
            None => Ok(None),
        }
    }

    async fn get_players_by_team(&self, team_id: TeamId) -> ServiceResult<Vec<Player>> {
        let rows = sqlx::query("SELECT * FROM players WHERE team_id = ? ORDER BY batting_order")
            .bind(team_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        rows.iter()
            .map(|row| {
                Self::player_from_row(row).map_err(|e| ServiceError::Internal(e.to_string()))
            })
            .collect::<ServiceResult<Vec<Player>>>()
    }

    async fn create_player(&self, player: &Player) -> ServiceResult<()> {
        let fields = vec![
            "id",
            "team_id",
            "first_name",
            "last_name",
            "jersey_number",
            "song_uri",
            "song_title",
            "song_artist",
            "song_artwork_url",
            "song_start_offset_ms",
            "batting_order",
            "is_active",
        ];

        let empty = String::new();
        let song = player.song.as_ref();
        sqlx::query(&format!(
            "INSERT INTO players ({}) VALUES ({})",
            fields.join(", "),
            fields.iter().map(|_| "?").collect::<Vec<_>>().join(", ")
        ))
        .bind(player.id.to_string())
        .bind(player.team_id.to_string())
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(player.jersey_number)
        .bind(song.map(|s| s.uri.as_str()).unwrap_or(&empty))
        .bind(song.map(|s| s.title.as_str()).unwrap_or(&empty))
        .bind(song.map(|s| s.artist.as_str()).unwrap_or(&empty))
        .bind(
            song.and_then(|s| s.artwork_url.as_deref())
                .unwrap_or(&empty),
        )
        .bind(song.map(|s| s.start_offset_ms).unwrap_or(0))
        .bind(player.batting_order)
        .bind(player.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

        Ok(())
    }

    async fn update_order_status(
        &self,
        id: PlayerId,
        batting_order: i64,
        is_active: bool,
    ) -> ServiceResult<()> {
        let result =
            sqlx::query("UPDATE players SET batting_order = ?, is_active = ? WHERE id = ?")
                .bind(batting_order)
                .bind(is_active)
                .bind(id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if result.rows_affected() == 0 {
            return ServiceError::not_found("Player not found");
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        id: PlayerId,
        update: &PlayerProfileUpdate,
    ) -> ServiceResult<()> {
        let mut sets = Vec::new();
        if update.first_name.is_some() {
            sets.push("first_name = ?");
        }
        if update.last_name.is_some() {
            sets.push("last_name = ?");
        }
        if update.jersey_number.is_some() {
            sets.push("jersey_number = ?");
        }
        if update.song.is_some() {
            sets.push("song_uri = ?");
            sets.push("song_title = ?");
            sets.push("song_artist = ?");
            sets.push("song_artwork_url = ?");
            sets.push("song_start_offset_ms = ?");
        }
        if sets.is_empty() {
            return Ok(());
        }

        let query_str = format!("UPDATE players SET {} WHERE id = ?", sets.join(", "));
        let mut query = sqlx::query(&query_str);
        if let Some(first_name) = &update.first_name {
            query = query.bind(first_name);
        }
        if let Some(last_name) = &update.last_name {
            query = query.bind(last_name);
        }
        if let Some(jersey_number) = update.jersey_number {
            query = query.bind(jersey_number);
        }
        if let Some(song) = &update.song {
            query = query
                .bind(&song.uri)
                .bind(&song.title)
                .bind(&song.artist)
                .bind(song.artwork_url.as_deref().unwrap_or(""))
                .bind(song.start_offset_ms);
        }
        query = query.bind(id.to_string());

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if result.rows_affected() == 0 {
            return ServiceError::not_found("Player not found");
        }
        Ok(())
    }

    async fn delete_player(&self, id: PlayerId) -> ServiceResult<()> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if result.rows_affected() == 0 {
            return ServiceError::not_found("Player not found");
        }
        Ok(())
    }
}
