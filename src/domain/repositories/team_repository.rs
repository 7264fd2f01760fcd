use async_trait::async_trait;

use crate::domain::error::DomainResult;
use crate::domain::ids::{TeamId, UserId};
use crate::domain::team::Team;

/// Repository trait for the Team aggregate
///
/// Defines the contract for persisting and retrieving teams. Aggregates are
/// loaded and saved whole; each call must be atomic with respect to other
/// calls on the same store.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a team (insert or update)
    async fn save(&self, team: &Team) -> DomainResult<()>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>>;

    /// Find the live team holding `name`, if any
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Team>>;

    /// Find every team holding a pending invitation addressed to `user`
    async fn find_with_pending_invitation_for(&self, user: UserId) -> DomainResult<Vec<Team>>;

    /// List all live teams
    async fn list(&self) -> DomainResult<Vec<Team>>;

    /// Delete a team by ID; fails with `NotFound` if it does not exist
    async fn delete(&self, id: TeamId) -> DomainResult<()>;
}
