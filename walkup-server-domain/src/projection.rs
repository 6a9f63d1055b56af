use std::sync::Arc;

use crate::{
    ServiceError, ServiceResult,
    lineup::build_partition,
    player::{ArcPlayerRepository, PlayerId, SongSelection},
    team::{ArcTeamRepository, EntitlementTier, ShareId},
};

/// The fields of a team's lineup safe to hand to an unauthenticated viewer.
/// The player id is retained only so clients can key list entries; nothing
/// about the owning account leaves this projection.
#[derive(Clone, Debug, PartialEq)]
pub struct PublicLineup {
    pub team_name: String,
    pub players: Vec<PublicPlayer>,
    pub warmup_available: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PublicPlayer {
    pub id: PlayerId,
    pub jersey_number: Option<i32>,
    pub display_name: String,
    pub song: Option<SongSelection>,
}

pub type ArcProjectionService = Arc<Box<dyn ProjectionService + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait ProjectionService {
    /// Resolves a public share id to the team's active lineup in batting
    /// order. Side-effect free and uncached: always reads whatever the last
    /// successful reconciliation committed.
    async fn get_public_lineup(&self, share_id: ShareId) -> ServiceResult<PublicLineup>;
}

pub struct ProjectionServiceImpl {
    player_repository: ArcPlayerRepository,
    team_repository: ArcTeamRepository,
}

impl ProjectionServiceImpl {
    pub fn new(player_repository: ArcPlayerRepository, team_repository: ArcTeamRepository) -> Self {
        Self {
            player_repository,
            team_repository,
        }
    }
}

#[async_trait::async_trait]
impl ProjectionService for ProjectionServiceImpl {
    async fn get_public_lineup(&self, share_id: ShareId) -> ServiceResult<PublicLineup> {
        let Some(team) = self.team_repository.get_team_by_share_id(share_id).await? else {
            return ServiceError::not_found("Unknown share id");
        };

        let lineup =
            build_partition(self.player_repository.get_players_by_team(team.id).await?);
        let players = lineup
            .active
            .into_iter()
            .map(|p| PublicPlayer {
                id: p.id,
                jersey_number: p.jersey_number,
                display_name: p.display_name(),
                song: p.song,
            })
            .collect();

        let warmup_available =
            team.tier == EntitlementTier::Premium && team.warmup_playlist.is_some();
        Ok(PublicLineup {
            team_name: team.name,
            players,
            warmup_available,
        })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::{
        player::{MemoryPlayerRepository, Player, PlayerRepository},
        team::{MemoryTeamRepository, Team, TeamId, TeamRepository},
    };

    use super::*;

    fn make_team(tier: EntitlementTier, warmup_playlist: Option<&str>) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: "Wombats".to_string(),
            share_id: Uuid::new_v4(),
            tier,
            warmup_playlist: warmup_playlist.map(|s| s.to_string()),
        }
    }

    fn make_player(team_id: TeamId, name: &str, batting_order: i64, is_active: bool) -> Player {
        Player {
            id: Uuid::new_v4(),
            team_id,
            first_name: name.to_string(),
            last_name: "Tester".to_string(),
            jersey_number: None,
            song: None,
            batting_order,
            is_active,
        }
    }

    async fn setup(team: &Team, players: &[Player]) -> ProjectionServiceImpl {
        let player_repo = MemoryPlayerRepository::new();
        let team_repo = MemoryTeamRepository::new();
        team_repo.create_team(team).await.unwrap();
        for player in players {
            player_repo.create_player(player).await.unwrap();
        }
        ProjectionServiceImpl::new(
            Arc::new(Box::new(player_repo)),
            Arc::new(Box::new(team_repo)),
        )
    }

    #[tokio::test]
    async fn test_projection_excludes_inactive_players() {
        let team = make_team(EntitlementTier::Free, None);
        let p1 = make_player(team.id, "p1", 1, true);
        let p2 = make_player(team.id, "p2", 0, true);
        let benched = make_player(team.id, "benched", 1000, false);
        let service = setup(&team, &[p1.clone(), p2.clone(), benched.clone()]).await;

        let projection = service.get_public_lineup(team.share_id).await.unwrap();

        let ids: Vec<PlayerId> = projection.players.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p2.id, p1.id]);
        assert_eq!(projection.team_name, "Wombats");
    }

    #[tokio::test]
    async fn test_projection_empty_lineup() {
        let team = make_team(EntitlementTier::Free, None);
        let benched = make_player(team.id, "benched", 1000, false);
        let service = setup(&team, &[benched]).await;

        let projection = service.get_public_lineup(team.share_id).await.unwrap();
        assert!(projection.players.is_empty());
    }

    #[tokio::test]
    async fn test_warmup_requires_premium_and_playlist() {
        let cases = [
            (EntitlementTier::Premium, Some("spotify:playlist:abc"), true),
            (EntitlementTier::Premium, None, false),
            (EntitlementTier::Free, Some("spotify:playlist:abc"), false),
            (EntitlementTier::Free, None, false),
        ];
        for (tier, playlist, expected) in cases {
            let team = make_team(tier, playlist);
            let service = setup(&team, &[]).await;
            let projection = service.get_public_lineup(team.share_id).await.unwrap();
            assert_eq!(projection.warmup_available, expected);
        }
    }

    #[tokio::test]
    async fn test_unknown_share_id() {
        let team = make_team(EntitlementTier::Free, None);
        let service = setup(&team, &[]).await;
        let result = service.get_public_lineup(Uuid::new_v4()).await;
        assert!(matches!(result, Err(ServiceError::NotFound(..))));
    }
}
