use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ids::{EnrollmentId, HackathonId, TeamId};

/// Lifecycle status of an enrollment.
///
/// # Status transitions
/// ```text
/// Confirmed ---> Withdrawn
///     |
///     +-------> Disqualified
/// ```
/// `Confirmed` is the only active state; both exits are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// The team is registered and counts toward the hackathon.
    Confirmed,
    /// The team pulled out voluntarily.
    Withdrawn,
    /// The team was removed by the organizer.
    Disqualified,
}

impl EnrollmentStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, EnrollmentStatus::Confirmed)
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EnrollmentStatus::Confirmed => "confirmed",
            EnrollmentStatus::Withdrawn => "withdrawn",
            EnrollmentStatus::Disqualified => "disqualified",
        };
        write!(f, "{}", label)
    }
}

/// A team's registration in one hackathon.
///
/// Owned by the enrolling team; the hackathon keeps only an id back-link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    id: EnrollmentId,
    team: TeamId,
    hackathon: HackathonId,
    enrolled_on: NaiveDate,
    status: EnrollmentStatus,
}

impl Enrollment {
    pub(crate) fn new(
        id: EnrollmentId,
        team: TeamId,
        hackathon: HackathonId,
        enrolled_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            team,
            hackathon,
            enrolled_on,
            status: EnrollmentStatus::Confirmed,
        }
    }

    pub fn id(&self) -> EnrollmentId {
        self.id
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn hackathon(&self) -> HackathonId {
        self.hackathon
    }

    pub fn enrolled_on(&self) -> NaiveDate {
        self.enrolled_on
    }

    pub fn status(&self) -> EnrollmentStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Voluntary exit, leader-initiated.
    pub(crate) fn withdraw(&mut self) -> DomainResult<()> {
        self.ensure_active()?;
        self.status = EnrollmentStatus::Withdrawn;
        Ok(())
    }

    /// Organizer-initiated removal.
    pub(crate) fn disqualify(&mut self) -> DomainResult<()> {
        self.ensure_active()?;
        self.status = EnrollmentStatus::Disqualified;
        Ok(())
    }

    fn ensure_active(&self) -> DomainResult<()> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(DomainError::invalid_state(format!(
                "enrollment {} is already {}",
                self.id, self.status
            )))
        }
    }
}
