use thiserror::Error;

use super::ids::{HackathonId, TeamId, UserId};

/// Errors surfaced by the membership and enrollment engines.
///
/// Every variant except `Storage` and `Invariant` is a precondition
/// failure: the operation that raised it mutated nothing, and the caller
/// may retry once the precondition holds. `Invariant` reports state that
/// no sequence of valid operations can produce and should be treated as
/// fatal by the calling layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// The acting user lacks the role the operation requires.
    #[error("user {0} is not authorized to perform this operation")]
    NotAuthorized(UserId),

    /// The user already belongs to a team.
    #[error("user {0} already belongs to a team")]
    AlreadyOnTeam(UserId),

    /// The user belongs to no team.
    #[error("user {0} does not belong to any team")]
    NotOnTeam(UserId),

    /// The target entity is not in a state that permits the operation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The team already holds a pending invitation for this candidate.
    #[error("team {team} already has a pending invitation for user {candidate}")]
    DuplicatePending { team: TeamId, candidate: UserId },

    /// Another live team already holds this name.
    #[error("team name '{0}' is already taken")]
    DuplicateName(String),

    /// The team already holds a confirmed enrollment in this hackathon.
    #[error("team {team} is already enrolled in hackathon {hackathon}")]
    AlreadyEnrolled { team: TeamId, hackathon: HackathonId },

    /// The referenced user is not a member of the team.
    #[error("user {user} is not a member of team {team}")]
    NotMember { user: UserId, team: TeamId },

    /// A referenced entity is not related to the operation as required.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The leader cannot depart until a vice-leader is in place.
    #[error("team {0} has no vice-leader to hand leadership to")]
    SuccessionRequired(TeamId),

    /// The team still has members besides the leader.
    #[error("team {0} still has other members")]
    TeamNotEmpty(TeamId),

    /// The hackathon's enrollment window has closed.
    #[error("enrollment for hackathon {0} is closed")]
    EnrollmentClosed(HackathonId),

    /// The team exceeds the hackathon's per-team member cap.
    #[error("team {team} has {size} members, above the hackathon limit of {max}")]
    TeamTooLarge {
        team: TeamId,
        size: usize,
        max: usize,
    },

    /// A referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Persisted state contradicts a domain invariant.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
