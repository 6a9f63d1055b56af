use std::{collections::HashSet, sync::Arc};

use log::{info, warn};

use crate::{
    ServiceError, ServiceResult,
    player::{ArcPlayerRepository, Player, PlayerId},
    team::{ArcTeamRepository, TeamId},
};

/// First rank handed to inactive players. Active ranks are rewritten as
/// contiguous zero-based integers, so any value comfortably above a plausible
/// roster size keeps the two ranges disjoint and a single global sort yields
/// active players first, in order.
pub const INACTIVE_RANK_BASE: i64 = 1000;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lineup {
    pub active: Vec<Player>,
    pub inactive: Vec<Player>,
}

/// Splits a team's flat player rows into the active batting order and the
/// inactive pool. Active players are sorted ascending by stored rank; the
/// inactive pool is sorted the same way purely for deterministic output, no
/// ordering is promised for it.
pub fn build_partition(mut players: Vec<Player>) -> Lineup {
    players.sort_by_key(|p| p.batting_order);
    let (active, inactive) = players.into_iter().partition(|p| p.is_active);
    Lineup { active, inactive }
}

pub type ArcLineupService = Arc<Box<dyn LineupService + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait LineupService {
    async fn get_lineup(&self, team_id: TeamId) -> ServiceResult<Lineup>;
    /// Persists the final arrangement an editor produced: `active[i]` gets
    /// rank `i` and stays in the public order, `inactive[j]` gets rank
    /// `INACTIVE_RANK_BASE + j` and leaves it. Team players named in neither
    /// list are left untouched.
    async fn reconcile(
        &self,
        team_id: TeamId,
        active: Vec<PlayerId>,
        inactive: Vec<PlayerId>,
    ) -> ServiceResult<()>;
}

pub struct LineupServiceImpl {
    player_repository: ArcPlayerRepository,
    team_repository: ArcTeamRepository,
}

impl LineupServiceImpl {
    pub fn new(player_repository: ArcPlayerRepository, team_repository: ArcTeamRepository) -> Self {
        Self {
            player_repository,
            team_repository,
        }
    }

    /// Input-contract checks, all before any write: no id may appear twice
    /// across the two lists, and every id must resolve to a player of the
    /// team being reconciled.
    async fn validate_arrangement(
        &self,
        team_id: TeamId,
        active: &[PlayerId],
        inactive: &[PlayerId],
    ) -> ServiceResult<()> {
        let mut seen = HashSet::new();
        for id in active.iter().chain(inactive.iter()) {
            if !seen.insert(*id) {
                return ServiceError::bad_request(format!(
                    "Player {} appears more than once in the arrangement",
                    id
                ));
            }
        }

        let roster: HashSet<PlayerId> = self
            .player_repository
            .get_players_by_team(team_id)
            .await?
            .iter()
            .map(|p| p.id)
            .collect();
        for id in active.iter().chain(inactive.iter()) {
            if roster.contains(id) {
                continue;
            }
            return match self.player_repository.get_player_by_id(*id).await? {
                Some(_) => ServiceError::forbidden(format!(
                    "Player {} does not belong to this team",
                    id
                )),
                None => ServiceError::not_found(format!("Player {} not found", id)),
            };
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl LineupService for LineupServiceImpl {
    async fn get_lineup(&self, team_id: TeamId) -> ServiceResult<Lineup> {
        if self.team_repository.get_team_by_id(team_id).await?.is_none() {
            return ServiceError::not_found("Team not found");
        }
        let players = self.player_repository.get_players_by_team(team_id).await?;
        Ok(build_partition(players))
    }

    async fn reconcile(
        &self,
        team_id: TeamId,
        active: Vec<PlayerId>,
        inactive: Vec<PlayerId>,
    ) -> ServiceResult<()> {
        if self.team_repository.get_team_by_id(team_id).await?.is_none() {
            return ServiceError::not_found("Team not found");
        }
        self.validate_arrangement(team_id, &active, &inactive)
            .await?;

        let mut writes = Vec::with_capacity(active.len() + inactive.len());
        for (i, id) in active.iter().enumerate() {
            writes.push((*id, i as i64, true));
        }
        for (j, id) in inactive.iter().enumerate() {
            writes.push((*id, INACTIVE_RANK_BASE + j as i64, false));
        }

        // Each write touches a disjoint row, so fire them all and await the
        // batch. No transaction: rows already written stay written even if a
        // later one fails, and the caller re-fetches and retries.
        let futures = writes
            .iter()
            .map(|(id, rank, is_active)| {
                self.player_repository
                    .update_order_status(*id, *rank, *is_active)
            })
            .collect::<Vec<_>>();
        let results = futures::future::join_all(futures).await;
        for ((id, _, _), result) in writes.iter().zip(results) {
            if let Err(e) = result {
                warn!(
                    "Lineup reconcile for team {} failed at player {}: {}",
                    team_id, id, e
                );
                return Err(ServiceError::PartialWrite {
                    player_id: *id,
                    cause: e.to_string(),
                });
            }
        }

        info!(
            "Reconciled lineup for team {}: {} active, {} inactive",
            team_id,
            active.len(),
            inactive.len()
        );
        Ok(())
    }
}
