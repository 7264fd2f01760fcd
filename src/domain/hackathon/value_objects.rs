use serde::{Deserialize, Serialize};

/// Represents the lifecycle status of a hackathon
///
/// # Status Transitions
/// ```text
/// EnrollmentOpen -> InProgress -> Judging -> Concluded
/// ```
/// The chain is strictly one-way; stages are never skipped or revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HackathonStatus {
    /// Teams may still register (subject to the enrollment deadline)
    EnrollmentOpen,
    /// The competition is running
    InProgress,
    /// Submissions are being evaluated
    Judging,
    /// The event is over; a winner may have been proclaimed
    Concluded,
}

impl HackathonStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// # Valid Transitions
    /// - EnrollmentOpen -> InProgress
    /// - InProgress -> Judging
    /// - Judging -> Concluded
    ///
    /// # Example
    /// ```
    /// use hackhub_core::domain::hackathon::value_objects::HackathonStatus;
    ///
    /// assert!(HackathonStatus::EnrollmentOpen.can_transition_to(HackathonStatus::InProgress));
    /// assert!(!HackathonStatus::EnrollmentOpen.can_transition_to(HackathonStatus::Judging));
    /// ```
    pub fn can_transition_to(&self, next: HackathonStatus) -> bool {
        use HackathonStatus::*;
        matches!(
            (self, next),
            (EnrollmentOpen, InProgress) | (InProgress, Judging) | (Judging, Concluded)
        )
    }
}

impl std::fmt::Display for HackathonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HackathonStatus::EnrollmentOpen => write!(f, "enrollment open"),
            HackathonStatus::InProgress => write!(f, "in progress"),
            HackathonStatus::Judging => write!(f, "judging"),
            HackathonStatus::Concluded => write!(f, "concluded"),
        }
    }
}
