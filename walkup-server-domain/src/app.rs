use std::sync::Arc;

use crate::{
    lineup::{ArcLineupService, LineupServiceImpl},
    player::ArcPlayerRepository,
    projection::{ArcProjectionService, ProjectionServiceImpl},
    roster::{ArcRosterService, RosterServiceImpl},
    team::ArcTeamRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub lineup_service: ArcLineupService,
    pub roster_service: ArcRosterService,
    pub projection_service: ArcProjectionService,

    pub player_repository: ArcPlayerRepository,
    pub team_repository: ArcTeamRepository,
}

pub fn construct_app(
    player_repository: ArcPlayerRepository,
    team_repository: ArcTeamRepository,
) -> AppState {
    let lineup_service: ArcLineupService = Arc::new(Box::new(LineupServiceImpl::new(
        player_repository.clone(),
        team_repository.clone(),
    )));

    let roster_service: ArcRosterService = Arc::new(Box::new(RosterServiceImpl::new(
        player_repository.clone(),
        team_repository.clone(),
    )));

    let projection_service: ArcProjectionService = Arc::new(Box::new(ProjectionServiceImpl::new(
        player_repository.clone(),
        team_repository.clone(),
    )));

    AppState {
        lineup_service,
        roster_service,
        projection_service,

        player_repository,
        team_repository,
    }
}
