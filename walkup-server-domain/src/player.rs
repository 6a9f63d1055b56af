use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::{ServiceError, ServiceResult, team::TeamId};

pub type PlayerId = Uuid;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub team_id: TeamId,
    pub first_name: String,
    pub last_name: String,
    pub jersey_number: Option<i32>,
    pub song: Option<SongSelection>,
    pub batting_order: i64,
    pub is_active: bool,
}

impl Player {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Spotify track reference plus the display metadata cached alongside it, so
/// the public lineup renders without a live metadata lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct SongSelection {
    pub uri: String,
    pub title: String,
    pub artist: String,
    pub artwork_url: Option<String>,
    pub start_offset_ms: i64,
}

/// Fields an editor provides when adding a player to the roster. Rank and
/// status are assigned by the roster service, never by the caller.
#[derive(Clone, Debug)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub jersey_number: Option<i32>,
    pub song: Option<SongSelection>,
}

/// Partial edit of presentational fields. `None` leaves a field unchanged.
/// Rank and status are deliberately absent; those only move through
/// reconciliation.
#[derive(Clone, Debug, Default)]
pub struct PlayerProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub jersey_number: Option<i32>,
    pub song: Option<SongSelection>,
}

pub type ArcPlayerRepository = Arc<Box<dyn PlayerRepository + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait PlayerRepository {
    async fn get_player_by_id(&self, id: PlayerId) -> ServiceResult<Option<Player>>;
    async fn get_players_by_team(&self, team_id: TeamId) -> ServiceResult<Vec<Player>>;
    async fn create_player(&self, player: &Player) -> ServiceResult<()>;
    /// Rewrites rank and partition membership only. Fails with `NotFound` if
    /// the row no longer exists, so a reconcile racing a delete reports the
    /// exact player that vanished.
    async fn update_order_status(
        &self,
        id: PlayerId,
        batting_order: i64,
        is_active: bool,
    ) -> ServiceResult<()>;
    async fn update_profile(&self, id: PlayerId, update: &PlayerProfileUpdate)
    -> ServiceResult<()>;
    async fn delete_player(&self, id: PlayerId) -> ServiceResult<()>;
}

#[derive(Default, Clone)]
pub struct MemoryPlayerRepository {
    players: Arc<DashMap<PlayerId, Player>>,
}

impl MemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PlayerRepository for MemoryPlayerRepository {
    async fn get_player_by_id(&self, id: PlayerId) -> ServiceResult<Option<Player>> {
        Ok(self.players.get(&id).map(|entry| entry.value().clone()))
    }

    async fn get_players_by_team(&self, team_id: TeamId) -> ServiceResult<Vec<Player>> {
        Ok(self
            .players
            .iter()
            .filter(|entry| entry.value().team_id == team_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn create_player(&self, player: &Player) -> ServiceResult<()> {
        self.players.insert(player.id, player.clone());
        Ok(())
    }

    async fn update_order_status(
        &self,
        id: PlayerId,
        batting_order: i64,
        is_active: bool,
    ) -> ServiceResult<()> {
        let Some(mut player) = self.players.get_mut(&id) else {
            return ServiceError::not_found("Player not found");
        };
        player.batting_order = batting_order;
        player.is_active = is_active;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: PlayerId,
        update: &PlayerProfileUpdate,
    ) -> ServiceResult<()> {
        let Some(mut player) = self.players.get_mut(&id) else {
            return ServiceError::not_found("Player not found");
        };
        if let Some(first_name) = &update.first_name {
            player.first_name = first_name.clone();
        }
        if let Some(last_name) = &update.last_name {
            player.last_name = last_name.clone();
        }
        if let Some(jersey_number) = update.jersey_number {
            player.jersey_number = Some(jersey_number);
        }
        if let Some(song) = &update.song {
            player.song = Some(song.clone());
        }
        Ok(())
    }

    async fn delete_player(&self, id: PlayerId) -> ServiceResult<()> {
        if self.players.remove(&id).is_none() {
            return ServiceError::not_found("Player not found");
        }
        Ok(())
    }
}
