use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};
use walkup_server_domain::{
    ServiceError, ServiceResult,
    team::{EntitlementTier, ShareId, Team, TeamId, TeamRepository},
};

use crate::{map_string_to_option, players::parse_uuid_column};

pub struct SqliteTeamRepository {
    pool: Pool<Sqlite>,
}

impl SqliteTeamRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn team_from_row(row: &SqliteRow) -> sqlx::Result<Team> {
        let tier: String = row.try_get("tier")?;
        let tier = match tier.as_str() {
            "premium" => EntitlementTier::Premium,
            _ => EntitlementTier::Free,
        };
        Ok(Team {
            id: parse_uuid_column(row, "id")?,
            name: row.try_get("name")?,
            share_id: parse_uuid_column(row, "share_id")?,
            tier,
            warmup_playlist: map_string_to_option(row.try_get("warmup_playlist")?),
        })
    }

    async fn fetch_team(&self, column: &str, value: String) -> ServiceResult<Option<Team>> {
        let row = sqlx::query(&format!("SELECT * FROM teams WHERE {} = ?", column))
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        match row {
            Some(row) => Self::team_from_row(&row)
                .map(Some)
                .map_err(|e| ServiceError::Internal(e.to_string())),
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn get_team_by_id(&self, id: TeamId) -> ServiceResult<Option<Team>> {
        self.fetch_team("id", id.to_string()).await
    }

    async fn get_team_by_share_id(&self, share_id: ShareId) -> ServiceResult<Option<Team>> {
        self.fetch_team("share_id", share_id.to_string()).await
    }

    async fn create_team(&self, team: &Team) -> ServiceResult<()> {
        let tier = match team.tier {
            EntitlementTier::Free => "free",
            EntitlementTier::Premium => "premium",
        };
        sqlx::query(
            "INSERT INTO teams (id, name, share_id, tier, warmup_playlist) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(team.id.to_string())
        .bind(&team.name)
        .bind(team.share_id.to_string())
        .bind(tier)
        .bind(team.warmup_playlist.as_deref().unwrap_or(""))
        .execute(&self.pool)
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
        Ok(())
    }
}
