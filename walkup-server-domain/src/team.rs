use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::ServiceResult;

pub type TeamId = Uuid;

/// Public, unauthenticated lookup key for a team's read-only lineup view.
pub type ShareId = Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntitlementTier {
    Free,
    Premium,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub share_id: ShareId,
    pub tier: EntitlementTier,
    pub warmup_playlist: Option<String>,
}

pub type ArcTeamRepository = Arc<Box<dyn TeamRepository + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait TeamRepository {
    async fn get_team_by_id(&self, id: TeamId) -> ServiceResult<Option<Team>>;
    async fn get_team_by_share_id(&self, share_id: ShareId) -> ServiceResult<Option<Team>>;
    async fn create_team(&self, team: &Team) -> ServiceResult<()>;
}

#[derive(Default, Clone)]
pub struct MemoryTeamRepository {
    teams: Arc<DashMap<TeamId, Team>>,
}

impl MemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TeamRepository for MemoryTeamRepository {
    async fn get_team_by_id(&self, id: TeamId) -> ServiceResult<Option<Team>> {
        Ok(self.teams.get(&id).map(|entry| entry.value().clone()))
    }

    async fn get_team_by_share_id(&self, share_id: ShareId) -> ServiceResult<Option<Team>> {
        Ok(self
            .teams
            .iter()
            .find(|entry| entry.value().share_id == share_id)
            .map(|entry| entry.value().clone()))
    }

    async fn create_team(&self, team: &Team) -> ServiceResult<()> {
        self.teams.insert(team.id, team.clone());
        Ok(())
    }
}
