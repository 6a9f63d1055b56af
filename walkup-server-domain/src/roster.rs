use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::{
    ServiceError, ServiceResult,
    player::{ArcPlayerRepository, NewPlayer, Player, PlayerId, PlayerProfileUpdate},
    team::{ArcTeamRepository, TeamId},
};

pub type ArcRosterService = Arc<Box<dyn RosterService + Send + Sync + 'static>>;

/// Roster lifecycle outside of reconciliation: adding, editing and removing
/// players. Profile edits never touch rank or status; those fields only move
/// through the lineup service.
#[async_trait::async_trait]
pub trait RosterService {
    async fn add_player(&self, team_id: TeamId, new_player: NewPlayer) -> ServiceResult<Player>;
    async fn update_player(
        &self,
        id: PlayerId,
        update: PlayerProfileUpdate,
    ) -> ServiceResult<Player>;
    async fn remove_player(&self, id: PlayerId) -> ServiceResult<()>;
}

pub struct RosterServiceImpl {
    player_repository: ArcPlayerRepository,
    team_repository: ArcTeamRepository,
}

impl RosterServiceImpl {
    pub fn new(player_repository: ArcPlayerRepository, team_repository: ArcTeamRepository) -> Self {
        Self {
            player_repository,
            team_repository,
        }
    }
}

#[async_trait::async_trait]
impl RosterService for RosterServiceImpl {
    async fn add_player(&self, team_id: TeamId, new_player: NewPlayer) -> ServiceResult<Player> {
        if self.team_repository.get_team_by_id(team_id).await?.is_none() {
            return ServiceError::not_found("Team not found");
        }

        // New players join the active partition, appended after the current
        // maximum active rank.
        let next_rank = self
            .player_repository
            .get_players_by_team(team_id)
            .await?
            .iter()
            .filter(|p| p.is_active)
            .map(|p| p.batting_order + 1)
            .max()
            .unwrap_or(0);

        let player = Player {
            id: Uuid::new_v4(),
            team_id,
            first_name: new_player.first_name,
            last_name: new_player.last_name,
            jersey_number: new_player.jersey_number,
            song: new_player.song,
            batting_order: next_rank,
            is_active: true,
        };
        self.player_repository.create_player(&player).await?;
        info!(
            "Added player {} to team {} at rank {}",
            player.id, team_id, next_rank
        );
        Ok(player)
    }

    async fn update_player(
        &self,
        id: PlayerId,
        update: PlayerProfileUpdate,
    ) -> ServiceResult<Player> {
        if self.player_repository.get_player_by_id(id).await?.is_none() {
            return ServiceError::not_found("Player not found");
        }
        self.player_repository.update_profile(id, &update).await?;
        match self.player_repository.get_player_by_id(id).await? {
            Some(player) => Ok(player),
            None => ServiceError::not_found("Player not found"),
        }
    }

    async fn remove_player(&self, id: PlayerId) -> ServiceResult<()> {
        self.player_repository.delete_player(id).await?;
        info!("Removed player {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        player::{MemoryPlayerRepository, PlayerRepository, SongSelection},
        team::{EntitlementTier, MemoryTeamRepository, Team, TeamRepository},
    };

    use super::*;

    async fn setup() -> (MemoryPlayerRepository, Team, RosterServiceImpl) {
        let player_repo = MemoryPlayerRepository::new();
        let team_repo = MemoryTeamRepository::new();
        let team = Team {
            id: Uuid::new_v4(),
            name: "Wombats".to_string(),
            share_id: Uuid::new_v4(),
            tier: EntitlementTier::Free,
            warmup_playlist: None,
        };
        team_repo.create_team(&team).await.unwrap();
        let service = RosterServiceImpl::new(
            Arc::new(Box::new(player_repo.clone())),
            Arc::new(Box::new(team_repo)),
        );
        (player_repo, team, service)
    }

    fn new_player(name: &str) -> NewPlayer {
        NewPlayer {
            first_name: name.to_string(),
            last_name: "Tester".to_string(),
            jersey_number: None,
            song: None,
        }
    }

    #[tokio::test]
    async fn test_first_player_gets_rank_zero() {
        let (_, team, service) = setup().await;
        let player = service.add_player(team.id, new_player("a")).await.unwrap();
        assert_eq!(player.batting_order, 0);
        assert!(player.is_active);
    }

    #[tokio::test]
    async fn test_add_player_appends_after_max_active_rank() {
        let (player_repo, team, service) = setup().await;
        service.add_player(team.id, new_player("a")).await.unwrap();
        let b = service.add_player(team.id, new_player("b")).await.unwrap();
        assert_eq!(b.batting_order, 1);

        // Inactive ranks do not count towards the append position.
        player_repo
            .update_order_status(b.id, crate::lineup::INACTIVE_RANK_BASE, false)
            .await
            .unwrap();
        let c = service.add_player(team.id, new_player("c")).await.unwrap();
        assert_eq!(c.batting_order, 1);
    }

    #[tokio::test]
    async fn test_add_player_unknown_team() {
        let (_, _, service) = setup().await;
        let result = service.add_player(Uuid::new_v4(), new_player("a")).await;
        assert!(matches!(result, Err(ServiceError::NotFound(..))));
    }

    #[tokio::test]
    async fn test_profile_update_leaves_rank_and_status_alone() {
        let (player_repo, team, service) = setup().await;
        service.add_player(team.id, new_player("a")).await.unwrap();
        let b = service.add_player(team.id, new_player("b")).await.unwrap();

        let updated = service
            .update_player(
                b.id,
                PlayerProfileUpdate {
                    first_name: Some("Billie".to_string()),
                    jersey_number: Some(12),
                    song: Some(SongSelection {
                        uri: "spotify:track:4uLU6hMCjMI75M1A2tKUQC".to_string(),
                        title: "Never Gonna Give You Up".to_string(),
                        artist: "Rick Astley".to_string(),
                        artwork_url: None,
                        start_offset_ms: 43000,
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Billie");
        assert_eq!(updated.last_name, "Tester");
        assert_eq!(updated.jersey_number, Some(12));
        assert_eq!(updated.batting_order, b.batting_order);
        assert_eq!(updated.is_active, b.is_active);

        let stored = player_repo.get_player_by_id(b.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_unknown_player() {
        let (_, _, service) = setup().await;
        let result = service
            .update_player(Uuid::new_v4(), PlayerProfileUpdate::default())
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound(..))));
    }

    #[tokio::test]
    async fn test_remove_player_is_a_hard_delete() {
        let (player_repo, team, service) = setup().await;
        let a = service.add_player(team.id, new_player("a")).await.unwrap();
        service.remove_player(a.id).await.unwrap();
        assert!(
            player_repo
                .get_player_by_id(a.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
