use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::HackathonStatus;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ids::{EnrollmentId, HackathonId, TeamId};

/// Per-team member cap applied when an event does not set its own.
pub const DEFAULT_MAX_TEAM_SIZE: usize = 5;

/// Back-link from a hackathon to one team's enrollment.
///
/// The enrollment entity itself lives inside the owning team; the
/// hackathon keeps only this id pair for its participant roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRef {
    pub enrollment: EnrollmentId,
    pub team: TeamId,
}

/// Hackathon aggregate root
///
/// A time-boxed competitive event that teams enroll into. The hackathon
/// owns its schedule, its enrollment window, and its per-team member cap;
/// it references enrolled teams only through id back-links.
///
/// # Invariants
/// - The lifecycle only moves forward (see [`HackathonStatus`])
/// - The enrollment deadline is inclusive of its whole calendar day
/// - A winner can only be declared during judging, from enrolled teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hackathon {
    id: HackathonId,
    name: String,
    status: HackathonStatus,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    enrollment_deadline: NaiveDate,
    max_team_size: usize,
    venue: Option<String>,
    rules: Option<String>,
    prize_pool: Option<Decimal>,
    enrollments: Vec<EnrollmentRef>,
    winner: Option<TeamId>,
}

impl Hackathon {
    /// Creates a new Hackathon with enrollment open
    ///
    /// # Business Rules Enforced
    /// - Name must not be blank
    /// - The event cannot end before it starts
    /// - Prize pool must be positive (if specified)
    /// - Initial status is always EnrollmentOpen, with the default member
    ///   cap until [`with_max_team_size`](Self::with_max_team_size) says
    ///   otherwise
    pub fn new(
        id: HackathonId,
        name: impl Into<String>,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        enrollment_deadline: NaiveDate,
        prize_pool: Option<Decimal>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid_argument("hackathon name cannot be blank"));
        }
        if ends_on < starts_on {
            return Err(DomainError::invalid_argument(format!(
                "hackathon cannot end ({ends_on}) before it starts ({starts_on})"
            )));
        }
        if let Some(prize) = prize_pool {
            if prize <= Decimal::ZERO {
                return Err(DomainError::invalid_argument("prize pool must be positive"));
            }
        }

        Ok(Self {
            id,
            name,
            status: HackathonStatus::EnrollmentOpen,
            starts_on,
            ends_on,
            enrollment_deadline,
            max_team_size: DEFAULT_MAX_TEAM_SIZE,
            venue: None,
            rules: None,
            prize_pool,
            enrollments: Vec::new(),
            winner: None,
        })
    }

    /// Sets the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Sets the rules text.
    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    /// Overrides the per-team member cap.
    pub fn with_max_team_size(mut self, max: usize) -> Self {
        self.max_team_size = max;
        self
    }

    pub fn id(&self) -> HackathonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> HackathonStatus {
        self.status
    }

    pub fn starts_on(&self) -> NaiveDate {
        self.starts_on
    }

    pub fn ends_on(&self) -> NaiveDate {
        self.ends_on
    }

    pub fn enrollment_deadline(&self) -> NaiveDate {
        self.enrollment_deadline
    }

    pub fn max_team_size(&self) -> usize {
        self.max_team_size
    }

    pub fn venue(&self) -> Option<&str> {
        self.venue.as_deref()
    }

    pub fn rules(&self) -> Option<&str> {
        self.rules.as_deref()
    }

    pub fn prize_pool(&self) -> Option<Decimal> {
        self.prize_pool
    }

    pub fn enrollments(&self) -> &[EnrollmentRef] {
        &self.enrollments
    }

    pub fn winner(&self) -> Option<TeamId> {
        self.winner
    }

    /// Whether `team` appears on the participant roster.
    pub fn has_enrollment_for(&self, team: TeamId) -> bool {
        self.enrollments.iter().any(|r| r.team == team)
    }

    /// Whether teams may still enroll as of `today`.
    ///
    /// Open means the lifecycle still sits at EnrollmentOpen and the
    /// deadline has not passed. The deadline day itself counts: enrolling
    /// on the deadline date succeeds, one day later does not.
    pub fn is_enrollment_open(&self, today: NaiveDate) -> bool {
        self.status == HackathonStatus::EnrollmentOpen && today <= self.enrollment_deadline
    }

    /// Moves the hackathon to `next` along its one-way lifecycle
    ///
    /// # Business Rules
    /// - Only adjacent forward transitions are allowed
    pub fn advance_to(&mut self, next: HackathonStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::invalid_state(format!(
                "hackathon {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    /// Records the winning team
    ///
    /// # Business Rules
    /// - Winners are declared during judging, not before or after
    /// - The winner must be on the participant roster
    pub fn declare_winner(&mut self, team: TeamId) -> DomainResult<()> {
        if self.status != HackathonStatus::Judging {
            return Err(DomainError::invalid_state(format!(
                "hackathon {} is {}, winners are declared during judging",
                self.id, self.status
            )));
        }
        if !self.has_enrollment_for(team) {
            return Err(DomainError::invalid_argument(format!(
                "team {team} never enrolled in hackathon {}",
                self.id
            )));
        }
        self.winner = Some(team);
        Ok(())
    }

    /// Adds a team's enrollment to the participant roster.
    pub(crate) fn link_enrollment(&mut self, enrollment: EnrollmentId, team: TeamId) {
        self.enrollments.push(EnrollmentRef { enrollment, team });
    }
}
