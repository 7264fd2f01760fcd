use serde::{Deserialize, Serialize};

use crate::domain::ids::{EnrollmentId, HackathonId, InvitationId, TeamId, UserId};

/// Domain events that occur within the Team aggregate
///
/// These events represent important business moments in a team's lifecycle.
/// The core only records them; delivering notifications (an invitation to
/// announce, a leadership handover to broadcast) is the calling layer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TeamEvent {
    /// Fired when a team is created
    Created {
        /// ID of the newly created team
        team: TeamId,
        /// The founding leader
        leader: UserId,
        /// The team's display name
        name: String,
    },
    /// Fired when the leader invites a candidate
    InvitationIssued {
        team: TeamId,
        invitation: InvitationId,
        candidate: UserId,
    },
    /// Fired when a candidate accepts and joins the team
    InvitationAccepted {
        team: TeamId,
        invitation: InvitationId,
        candidate: UserId,
    },
    /// Fired when an invitation is declined, either by the candidate or
    /// automatically once they joined another team
    InvitationRejected {
        team: TeamId,
        invitation: InvitationId,
        candidate: UserId,
    },
    /// Fired when the leader designates a vice-leader
    ViceLeaderNominated { team: TeamId, member: UserId },
    /// Fired when a member leaves the team
    MemberDeparted { team: TeamId, member: UserId },
    /// Fired when leadership passes from one member to another
    LeadershipTransferred {
        team: TeamId,
        from: UserId,
        to: UserId,
    },
    /// Fired when the team ceases to exist
    Dissolved { team: TeamId },
    /// Fired when the team enrolls into a hackathon
    Enrolled {
        team: TeamId,
        enrollment: EnrollmentId,
        hackathon: HackathonId,
    },
    /// Fired when the team withdraws an enrollment
    EnrollmentWithdrawn {
        team: TeamId,
        enrollment: EnrollmentId,
    },
    /// Fired when the organizer disqualifies an enrollment
    EnrollmentDisqualified {
        team: TeamId,
        enrollment: EnrollmentId,
    },
}

impl TeamEvent {
    /// Returns the team this event belongs to
    pub fn team_id(&self) -> TeamId {
        match self {
            TeamEvent::Created { team, .. } => *team,
            TeamEvent::InvitationIssued { team, .. } => *team,
            TeamEvent::InvitationAccepted { team, .. } => *team,
            TeamEvent::InvitationRejected { team, .. } => *team,
            TeamEvent::ViceLeaderNominated { team, .. } => *team,
            TeamEvent::MemberDeparted { team, .. } => *team,
            TeamEvent::LeadershipTransferred { team, .. } => *team,
            TeamEvent::Dissolved { team } => *team,
            TeamEvent::Enrolled { team, .. } => *team,
            TeamEvent::EnrollmentWithdrawn { team, .. } => *team,
            TeamEvent::EnrollmentDisqualified { team, .. } => *team,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_event_carries_its_team() {
        let event = TeamEvent::Created {
            team: TeamId::new(4),
            leader: UserId::new(1),
            name: "Rust Buccaneers".to_string(),
        };

        assert_eq!(event.team_id(), TeamId::new(4));
    }

    #[test]
    fn every_variant_reports_a_team_id() {
        let team = TeamId::new(9);
        let events = vec![
            TeamEvent::InvitationIssued {
                team,
                invitation: InvitationId::new(1),
                candidate: UserId::new(2),
            },
            TeamEvent::LeadershipTransferred {
                team,
                from: UserId::new(1),
                to: UserId::new(2),
            },
            TeamEvent::Dissolved { team },
            TeamEvent::EnrollmentWithdrawn {
                team,
                enrollment: EnrollmentId::new(3),
            },
        ];

        for event in events {
            assert_eq!(event.team_id(), team);
        }
    }
}
