use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ids::{InvitationId, TeamId, UserId};

/// Lifecycle status of an invitation.
///
/// # Status transitions
/// ```text
/// Pending ---> Accepted
///    |
///    +------> Rejected
/// ```
/// Both outcomes are terminal; a responded invitation never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Sent, awaiting the candidate's response.
    Pending,
    /// The candidate accepted and joined the team.
    Accepted,
    /// Declined by the candidate, or voided by the platform.
    Rejected,
}

impl InvitationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, InvitationStatus::Pending)
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Rejected => "rejected",
        };
        write!(f, "{}", label)
    }
}

/// An invitation from a team to a candidate user.
///
/// Invitations are owned by the issuing team: the team creates them, stores
/// them, and takes them down with it when it dissolves. The candidate is
/// referenced by id only and holds no copy.
///
/// The response date is set exactly when the invitation leaves `Pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    id: InvitationId,
    team: TeamId,
    candidate: UserId,
    status: InvitationStatus,
    sent_on: NaiveDate,
    responded_on: Option<NaiveDate>,
}

impl Invitation {
    pub(crate) fn new(
        id: InvitationId,
        team: TeamId,
        candidate: UserId,
        sent_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            team,
            candidate,
            status: InvitationStatus::Pending,
            sent_on,
            responded_on: None,
        }
    }

    pub fn id(&self) -> InvitationId {
        self.id
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn candidate(&self) -> UserId {
        self.candidate
    }

    pub fn status(&self) -> InvitationStatus {
        self.status
    }

    pub fn sent_on(&self) -> NaiveDate {
        self.sent_on
    }

    /// The date the candidate responded, `None` while pending.
    pub fn responded_on(&self) -> Option<NaiveDate> {
        self.responded_on
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Marks the invitation accepted, recording the response date.
    pub(crate) fn accept(&mut self, today: NaiveDate) -> DomainResult<()> {
        self.ensure_pending()?;
        self.status = InvitationStatus::Accepted;
        self.responded_on = Some(today);
        Ok(())
    }

    /// Marks the invitation rejected, recording the response date.
    pub(crate) fn reject(&mut self, today: NaiveDate) -> DomainResult<()> {
        self.ensure_pending()?;
        self.status = InvitationStatus::Rejected;
        self.responded_on = Some(today);
        Ok(())
    }

    /// Rejects the invitation if it is still pending. Reports whether it
    /// did anything, so cascade callers can skip already-settled ones
    /// without raising an error.
    pub(crate) fn decline_if_pending(&mut self, today: NaiveDate) -> bool {
        if self.status.is_pending() {
            self.status = InvitationStatus::Rejected;
            self.responded_on = Some(today);
            true
        } else {
            false
        }
    }

    fn ensure_pending(&self) -> DomainResult<()> {
        if self.status.is_pending() {
            Ok(())
        } else {
            Err(DomainError::invalid_state(format!(
                "invitation {} is {}, not pending",
                self.id, self.status
            )))
        }
    }
}
