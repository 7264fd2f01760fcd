use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ids::{TeamId, UserId};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::Team;

/// Thread-safe in-memory implementation of `TeamRepository`
///
/// Useful for testing and development. Data is lost when the process
/// terminates. The table lock is held for the full duration of each call,
/// so every save lands atomically with respect to concurrent readers.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<HashMap<TeamId, Team>>,
}

impl InMemoryTeamRepository {
    /// Creates an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn save(&self, team: &Team) -> DomainResult<()> {
        let mut teams = self
            .teams
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;
        teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>> {
        let teams = self
            .teams
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;
        Ok(teams.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Team>> {
        let teams = self
            .teams
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;
        Ok(teams.values().find(|t| t.name() == name).cloned())
    }

    async fn find_with_pending_invitation_for(&self, user: UserId) -> DomainResult<Vec<Team>> {
        let teams = self
            .teams
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;
        let mut matching: Vec<Team> = teams
            .values()
            .filter(|t| t.pending_invitation_for(user).is_some())
            .cloned()
            .collect();
        matching.sort_by_key(|t| t.id());
        Ok(matching)
    }

    async fn list(&self) -> DomainResult<Vec<Team>> {
        let teams = self
            .teams
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;
        let mut all: Vec<Team> = teams.values().cloned().collect();
        all.sort_by_key(|t| t.id());
        Ok(all)
    }

    async fn delete(&self, id: TeamId) -> DomainResult<()> {
        let mut teams = self
            .teams
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;
        teams
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(format!("team {id} not found")))
    }
}
