//! Typed identifiers for every entity kind, and the allocator that mints
//! them.
//!
//! Ids are opaque `u64` newtypes so a `TeamId` can never be passed where a
//! `UserId` is expected. Fresh ids come from [`IdAllocator`], which the
//! calling layer constructs once and shares with the engines.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Identifier of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wraps a raw id, e.g. when rebuilding entities from storage.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(u64);

impl TeamId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvitationId(u64);

impl InvitationId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InvitationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentId(u64);

impl EnrollmentId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a hackathon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HackathonId(u64);

impl HackathonId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HackathonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues fresh identifiers for every entity kind.
///
/// Each kind has its own counter. Within one allocator, ids of a kind start
/// at 1, strictly increase, and are never reused; a deleted entity's id
/// stays retired. Counters are independent, so a `UserId` and a `TeamId`
/// may share the same numeric value.
#[derive(Debug, Default)]
pub struct IdAllocator {
    users: AtomicU64,
    teams: AtomicU64,
    invitations: AtomicU64,
    enrollments: AtomicU64,
    hackathons: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_user_id(&self) -> UserId {
        UserId(self.users.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn next_team_id(&self) -> TeamId {
        TeamId(self.teams.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn next_invitation_id(&self) -> InvitationId {
        InvitationId(self.invitations.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn next_enrollment_id(&self) -> EnrollmentId {
        EnrollmentId(self.enrollments.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn next_hackathon_id(&self) -> HackathonId {
        HackathonId(self.hackathons.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
