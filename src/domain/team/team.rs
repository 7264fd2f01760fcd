use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enrollment::Enrollment;
use super::events::TeamEvent;
use super::invitation::Invitation;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ids::{EnrollmentId, HackathonId, InvitationId, TeamId, UserId};

/// One user's membership record within a team.
///
/// Roles are flags on the record, not different kinds of member: the
/// vice-leader is an ordinary membership with `vice_leader` set, and the
/// leader is whichever member the team's `leader` field points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    user: UserId,
    joined_on: NaiveDate,
    vice_leader: bool,
}

impl Membership {
    fn new(user: UserId, joined_on: NaiveDate) -> Self {
        Self {
            user,
            joined_on,
            vice_leader: false,
        }
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn joined_on(&self) -> NaiveDate {
        self.joined_on
    }

    pub fn is_vice_leader(&self) -> bool {
        self.vice_leader
    }
}

/// How a departure resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// An ordinary member (or the vice-leader) left; leadership unchanged.
    MemberLeft,
    /// The leader left and the vice-leader was promoted in their place.
    LeadershipTransferred { new_leader: UserId },
    /// The leader was the last member; the team must be deleted.
    Dissolved,
}

/// Team aggregate root
///
/// A team is a group of users competing together. It owns its membership
/// records, its outbound invitations, and its hackathon enrollments: all
/// three are created through the aggregate and none outlives it.
///
/// # Invariants
/// - The leader is always a member, and a live team is never empty
/// - At most one member carries the vice-leader flag, and never the leader
/// - An invitation's response date is set exactly when it leaves Pending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    description: Option<String>,
    created_on: NaiveDate,
    leader: UserId,
    members: Vec<Membership>,
    invitations: Vec<Invitation>,
    enrollments: Vec<Enrollment>,
}

impl Team {
    /// Creates a new Team aggregate with `leader` as its sole member
    ///
    /// # Business Rules Enforced
    /// - Name must not be blank
    /// - The founder starts as leader and only member
    /// - Team generates a Created event
    pub(crate) fn new(
        id: TeamId,
        name: impl Into<String>,
        description: Option<String>,
        leader: UserId,
        today: NaiveDate,
    ) -> DomainResult<(Self, Vec<TeamEvent>)> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid_argument("team name cannot be blank"));
        }

        let team = Self {
            id,
            name: name.clone(),
            description,
            created_on: today,
            leader,
            members: vec![Membership::new(leader, today)],
            invitations: Vec::new(),
            enrollments: Vec::new(),
        };

        let events = vec![TeamEvent::Created {
            team: id,
            leader,
            name,
        }];

        Ok((team, events))
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_on(&self) -> NaiveDate {
        self.created_on
    }

    /// The current leader's user id.
    pub fn leader(&self) -> UserId {
        self.leader
    }

    pub fn members(&self) -> &[Membership] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, user: UserId) -> bool {
        self.members.iter().any(|m| m.user == user)
    }

    pub fn is_leader(&self, user: UserId) -> bool {
        self.leader == user
    }

    /// The current vice-leader, if one has been nominated.
    pub fn vice_leader(&self) -> Option<UserId> {
        self.members
            .iter()
            .find(|m| m.vice_leader)
            .map(|m| m.user)
    }

    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    pub fn invitation(&self, id: InvitationId) -> Option<&Invitation> {
        self.invitations.iter().find(|i| i.id() == id)
    }

    /// The still-pending invitation addressed to `candidate`, if any.
    pub fn pending_invitation_for(&self, candidate: UserId) -> Option<&Invitation> {
        self.invitations
            .iter()
            .find(|i| i.candidate() == candidate && i.is_pending())
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    pub fn enrollment(&self, id: EnrollmentId) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.id() == id)
    }

    /// Whether the team holds a Confirmed enrollment in `hackathon`.
    pub fn has_active_enrollment(&self, hackathon: HackathonId) -> bool {
        self.enrollments
            .iter()
            .any(|e| e.hackathon() == hackathon && e.is_active())
    }

    pub(crate) fn ensure_leader(&self, user: UserId) -> DomainResult<()> {
        if self.leader == user {
            Ok(())
        } else {
            Err(DomainError::NotAuthorized(user))
        }
    }

    /// Issues a Pending invitation to `candidate`
    ///
    /// # Business Rules
    /// - Only the leader invites
    /// - One pending invitation per candidate per team; earlier settled
    ///   invitations to the same candidate do not block a new one
    ///
    /// The caller is expected to have verified that the candidate is not
    /// already on some team; the aggregate can only answer for its own
    /// state.
    pub(crate) fn invite(
        &mut self,
        id: InvitationId,
        inviter: UserId,
        candidate: UserId,
        today: NaiveDate,
    ) -> DomainResult<(Invitation, TeamEvent)> {
        self.ensure_leader(inviter)?;

        if self.pending_invitation_for(candidate).is_some() {
            return Err(DomainError::DuplicatePending {
                team: self.id,
                candidate,
            });
        }

        let invitation = Invitation::new(id, self.id, candidate, today);
        self.invitations.push(invitation.clone());

        let event = TeamEvent::InvitationIssued {
            team: self.id,
            invitation: id,
            candidate,
        };
        Ok((invitation, event))
    }

    /// Records `candidate` accepting invitation `invitation`
    ///
    /// The invitation turns Accepted and the candidate joins the member
    /// set, as one step: there is no instant at which the invitation is
    /// accepted but the membership missing.
    pub(crate) fn accept_invitation(
        &mut self,
        invitation: InvitationId,
        candidate: UserId,
        today: NaiveDate,
    ) -> DomainResult<TeamEvent> {
        self.invitation_for_response(invitation, candidate)?
            .accept(today)?;
        self.members.push(Membership::new(candidate, today));

        Ok(TeamEvent::InvitationAccepted {
            team: self.id,
            invitation,
            candidate,
        })
    }

    /// Records `candidate` declining invitation `invitation`
    pub(crate) fn reject_invitation(
        &mut self,
        invitation: InvitationId,
        candidate: UserId,
        today: NaiveDate,
    ) -> DomainResult<TeamEvent> {
        self.invitation_for_response(invitation, candidate)?
            .reject(today)?;

        Ok(TeamEvent::InvitationRejected {
            team: self.id,
            invitation,
            candidate,
        })
    }

    /// Rejects every invitation to `candidate` that is still pending.
    ///
    /// Used when the candidate joins some team and their other open
    /// invitations become moot. Settled invitations are left alone.
    pub(crate) fn reject_pending_for(
        &mut self,
        candidate: UserId,
        today: NaiveDate,
    ) -> Vec<TeamEvent> {
        let team = self.id;
        let mut events = Vec::new();
        for inv in self
            .invitations
            .iter_mut()
            .filter(|i| i.candidate() == candidate)
        {
            if inv.decline_if_pending(today) {
                events.push(TeamEvent::InvitationRejected {
                    team,
                    invitation: inv.id(),
                    candidate,
                });
            }
        }
        events
    }

    /// Nominates `member` as vice-leader
    ///
    /// # Business Rules
    /// - Only the leader nominates
    /// - The nominee must be a member other than the leader
    /// - Nominating demotes any previous vice-leader, so at most one
    ///   member holds the flag at any instant
    pub(crate) fn nominate_vice_leader(
        &mut self,
        caller: UserId,
        member: UserId,
    ) -> DomainResult<TeamEvent> {
        self.ensure_leader(caller)?;

        if !self.is_member(member) {
            return Err(DomainError::NotMember {
                user: member,
                team: self.id,
            });
        }
        if member == self.leader {
            return Err(DomainError::invalid_argument(
                "the leader cannot be their own vice-leader",
            ));
        }

        for m in self.members.iter_mut() {
            m.vice_leader = m.user == member;
        }

        Ok(TeamEvent::ViceLeaderNominated {
            team: self.id,
            member,
        })
    }

    /// Removes `member` from the team, applying the succession rules
    ///
    /// # Business Rules
    /// - An ordinary member, or the vice-leader, simply leaves
    /// - A leader with a vice-leader hands leadership to them first
    /// - A leader without one cannot abandon a team that still has other
    ///   members: the call fails with `SuccessionRequired` and nothing
    ///   changes
    /// - A leader who is the sole member dissolves the team; every pending
    ///   invitation is rejected on the way out
    pub(crate) fn depart(
        &mut self,
        member: UserId,
        today: NaiveDate,
    ) -> DomainResult<(Departure, Vec<TeamEvent>)> {
        if !self.is_member(member) {
            return Err(DomainError::NotMember {
                user: member,
                team: self.id,
            });
        }

        if member != self.leader {
            // Ordinary member or vice-leader; the flag leaves with the record.
            self.remove_membership(member);
            let events = vec![TeamEvent::MemberDeparted {
                team: self.id,
                member,
            }];
            return Ok((Departure::MemberLeft, events));
        }

        if let Some(vice) = self.vice_leader() {
            for m in self.members.iter_mut() {
                m.vice_leader = false;
            }
            self.leader = vice;
            self.remove_membership(member);

            let events = vec![
                TeamEvent::LeadershipTransferred {
                    team: self.id,
                    from: member,
                    to: vice,
                },
                TeamEvent::MemberDeparted {
                    team: self.id,
                    member,
                },
            ];
            return Ok((
                Departure::LeadershipTransferred { new_leader: vice },
                events,
            ));
        }

        if self.members.len() > 1 {
            return Err(DomainError::SuccessionRequired(self.id));
        }

        // Sole member: the team goes down with its leader.
        let mut events = vec![TeamEvent::MemberDeparted {
            team: self.id,
            member,
        }];
        events.extend(self.reject_all_pending(today));
        events.push(TeamEvent::Dissolved { team: self.id });
        self.remove_membership(member);

        Ok((Departure::Dissolved, events))
    }

    /// Dissolves the team at the leader's explicit request
    ///
    /// # Business Rules
    /// - Only the leader may delete the team
    /// - Every other member must have departed first
    /// - Pending invitations are rejected before the team disappears
    pub(crate) fn dissolve(
        &mut self,
        caller: UserId,
        today: NaiveDate,
    ) -> DomainResult<Vec<TeamEvent>> {
        self.ensure_leader(caller)?;

        if self.members.len() > 1 {
            return Err(DomainError::TeamNotEmpty(self.id));
        }

        let mut events = self.reject_all_pending(today);
        events.push(TeamEvent::Dissolved { team: self.id });
        Ok(events)
    }

    /// Stores a freshly confirmed enrollment on the aggregate.
    pub(crate) fn record_enrollment(&mut self, enrollment: Enrollment) -> TeamEvent {
        let event = TeamEvent::Enrolled {
            team: self.id,
            enrollment: enrollment.id(),
            hackathon: enrollment.hackathon(),
        };
        self.enrollments.push(enrollment);
        event
    }

    pub(crate) fn enrollment_mut(
        &mut self,
        id: EnrollmentId,
    ) -> DomainResult<&mut Enrollment> {
        let team = self.id;
        self.enrollments
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| {
                DomainError::not_found(format!("enrollment {id} not found in team {team}"))
            })
    }

    /// Looks up an invitation `candidate` may respond to.
    fn invitation_for_response(
        &mut self,
        invitation: InvitationId,
        candidate: UserId,
    ) -> DomainResult<&mut Invitation> {
        let team = self.id;
        let inv = self
            .invitations
            .iter_mut()
            .find(|i| i.id() == invitation)
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "invitation {invitation} not found in team {team}"
                ))
            })?;

        if inv.candidate() != candidate {
            return Err(DomainError::invalid_state(format!(
                "invitation {invitation} is not addressed to user {candidate}"
            )));
        }
        Ok(inv)
    }

    fn reject_all_pending(&mut self, today: NaiveDate) -> Vec<TeamEvent> {
        let team = self.id;
        let mut events = Vec::new();
        for inv in self.invitations.iter_mut() {
            if inv.decline_if_pending(today) {
                events.push(TeamEvent::InvitationRejected {
                    team,
                    invitation: inv.id(),
                    candidate: inv.candidate(),
                });
            }
        }
        events
    }

    fn remove_membership(&mut self, member: UserId) {
        self.members.retain(|m| m.user != member);
    }
}
