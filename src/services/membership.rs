use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::clock::Clock;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ids::{IdAllocator, InvitationId, TeamId, UserId};
use crate::domain::repositories::{TeamRepository, UserRepository};
use crate::domain::team::{Departure, Invitation, Team, TeamEvent};
use crate::domain::user::User;

/// Membership and succession engine
///
/// Drives every transition in the team-membership lifecycle: founding a
/// team, inviting candidates, responding to invitations, nominating a
/// vice-leader, departing with succession, and dissolving. Each operation
/// verifies all of its preconditions before saving anything, so a failed
/// call never leaves a partial mutation behind.
///
/// Operations return the domain events they raised; relaying them (say, as
/// notifications) is the calling layer's business.
pub struct MembershipService<U, T>
where
    U: UserRepository,
    T: TeamRepository,
{
    users: Arc<U>,
    teams: Arc<T>,
    ids: Arc<IdAllocator>,
    clock: Arc<dyn Clock>,
}

impl<U, T> MembershipService<U, T>
where
    U: UserRepository,
    T: TeamRepository,
{
    /// Create a new membership service
    pub fn new(users: Arc<U>, teams: Arc<T>, ids: Arc<IdAllocator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            teams,
            ids,
            clock,
        }
    }

    /// Founds a team with `user_id` as leader and sole member
    ///
    /// # Errors
    /// - `AlreadyOnTeam` if the founder already belongs to a team
    /// - `DuplicateName` if a live team already holds `name`
    /// - `InvalidArgument` if `name` is blank
    pub async fn create_team(
        &self,
        user_id: UserId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> DomainResult<(Team, Vec<TeamEvent>)> {
        let name = name.into();
        info!(user = %user_id, name = %name, "creating team");

        let mut user = self.load_user(user_id).await?;
        if user.has_team() {
            return Err(DomainError::AlreadyOnTeam(user_id));
        }
        if self.teams.find_by_name(&name).await?.is_some() {
            return Err(DomainError::DuplicateName(name));
        }

        let id = self.ids.next_team_id();
        let (team, events) = Team::new(id, name, description, user_id, self.clock.today())?;
        user.join_team(id);

        self.users.save(&user).await?;
        self.teams.save(&team).await?;

        Ok((team, events))
    }

    /// Invites `candidate` to join `team_id`
    ///
    /// # Errors
    /// - `NotAuthorized` if `inviter` is not the team's leader
    /// - `AlreadyOnTeam` if the candidate already belongs to a team
    /// - `DuplicatePending` if the team already has a pending invitation
    ///   for this candidate
    pub async fn invite_user(
        &self,
        team_id: TeamId,
        inviter: UserId,
        candidate: UserId,
    ) -> DomainResult<(Invitation, Vec<TeamEvent>)> {
        info!(team = %team_id, inviter = %inviter, candidate = %candidate, "issuing invitation");

        let candidate_user = self.load_user(candidate).await?;
        let mut team = self.load_team(team_id).await?;

        team.ensure_leader(inviter)?;
        if candidate_user.has_team() {
            return Err(DomainError::AlreadyOnTeam(candidate));
        }

        let id = self.ids.next_invitation_id();
        let (invitation, event) = team.invite(id, inviter, candidate, self.clock.today())?;
        self.teams.save(&team).await?;

        Ok((invitation, vec![event]))
    }

    /// Accepts an invitation, joining `user_id` to the team
    ///
    /// Accepting settles more than one record: the chosen invitation turns
    /// Accepted, and every other invitation still pending for this user,
    /// on this team or any other, is rejected in the same operation. The
    /// rejected ones are saved before the join so no reader ever sees the
    /// user on a team while an invitation to them is still open.
    ///
    /// # Errors
    /// - `AlreadyOnTeam` if the user already belongs to a team
    /// - `InvalidState` if the invitation is settled or addressed to
    ///   someone else
    pub async fn accept_invitation(
        &self,
        user_id: UserId,
        team_id: TeamId,
        invitation_id: InvitationId,
    ) -> DomainResult<Vec<TeamEvent>> {
        info!(user = %user_id, team = %team_id, invitation = %invitation_id, "accepting invitation");

        let mut user = self.load_user(user_id).await?;
        if user.has_team() {
            return Err(DomainError::AlreadyOnTeam(user_id));
        }
        let mut team = self.load_team(team_id).await?;
        let today = self.clock.today();

        let mut events = vec![team.accept_invitation(invitation_id, user_id, today)?];
        user.join_team(team_id);
        events.extend(team.reject_pending_for(user_id, today));

        // The store still holds this team's pre-accept state, so filter it
        // out of the sibling query and use the local copy instead.
        let mut siblings: Vec<Team> = self
            .teams
            .find_with_pending_invitation_for(user_id)
            .await?
            .into_iter()
            .filter(|t| t.id() != team_id)
            .collect();
        for sibling in siblings.iter_mut() {
            events.extend(sibling.reject_pending_for(user_id, today));
        }
        let rejected = events.len() - 1;
        debug!(user = %user_id, rejected, "auto-declined competing invitations");

        for sibling in &siblings {
            self.teams.save(sibling).await?;
        }
        self.users.save(&user).await?;
        self.teams.save(&team).await?;

        Ok(events)
    }

    /// Declines an invitation; the user's standing is otherwise untouched
    ///
    /// # Errors
    /// - `InvalidState` if the invitation is settled or addressed to
    ///   someone else
    pub async fn reject_invitation(
        &self,
        user_id: UserId,
        team_id: TeamId,
        invitation_id: InvitationId,
    ) -> DomainResult<Vec<TeamEvent>> {
        info!(user = %user_id, team = %team_id, invitation = %invitation_id, "rejecting invitation");

        self.load_user(user_id).await?;
        let mut team = self.load_team(team_id).await?;

        let event = team.reject_invitation(invitation_id, user_id, self.clock.today())?;
        self.teams.save(&team).await?;

        Ok(vec![event])
    }

    /// Nominates a member as the team's vice-leader
    ///
    /// Replaces any previous vice-leader; the team never has two.
    ///
    /// # Errors
    /// - `NotAuthorized` if `caller` is not the leader
    /// - `NotMember` if the nominee is not on the team
    /// - `InvalidArgument` if the nominee is the leader themselves
    pub async fn nominate_vice_leader(
        &self,
        caller: UserId,
        team_id: TeamId,
        member: UserId,
    ) -> DomainResult<Vec<TeamEvent>> {
        info!(team = %team_id, caller = %caller, member = %member, "nominating vice-leader");

        let mut team = self.load_team(team_id).await?;
        let event = team.nominate_vice_leader(caller, member)?;
        self.teams.save(&team).await?;

        Ok(vec![event])
    }

    /// Removes `user_id` from their current team, applying succession
    ///
    /// The outcome depends on the member's role: ordinary members and the
    /// vice-leader simply leave; a leader with a vice-leader hands over
    /// first; a sole leader takes the team down with them. A leader with
    /// other members but no vice-leader cannot depart at all.
    ///
    /// # Errors
    /// - `NotOnTeam` if the user belongs to no team
    /// - `SuccessionRequired` if the leader must nominate a vice first
    pub async fn depart_team(&self, user_id: UserId) -> DomainResult<(Departure, Vec<TeamEvent>)> {
        info!(user = %user_id, "departing team");

        let mut user = self.load_user(user_id).await?;
        let mut team = self.load_team_of(&user).await?;

        let (departure, events) = team.depart(user_id, self.clock.today())?;
        user.leave_team();

        self.users.save(&user).await?;
        match departure {
            Departure::Dissolved => self.teams.delete(team.id()).await?,
            _ => self.teams.save(&team).await?,
        }

        Ok((departure, events))
    }

    /// Deletes the caller's team at their explicit request
    ///
    /// # Errors
    /// - `NotOnTeam` if the caller belongs to no team
    /// - `NotAuthorized` if the caller is not the leader
    /// - `TeamNotEmpty` while other members remain
    pub async fn delete_team(&self, user_id: UserId) -> DomainResult<Vec<TeamEvent>> {
        info!(user = %user_id, "deleting team");

        let mut user = self.load_user(user_id).await?;
        let mut team = self.load_team_of(&user).await?;

        let events = team.dissolve(user_id, self.clock.today())?;
        user.leave_team();

        self.users.save(&user).await?;
        self.teams.delete(team.id()).await?;

        Ok(events)
    }

    /// Lists the invitations still awaiting `user_id`'s response, oldest
    /// first
    pub async fn pending_invitations_for(&self, user_id: UserId) -> DomainResult<Vec<Invitation>> {
        self.load_user(user_id).await?;

        let teams = self.teams.find_with_pending_invitation_for(user_id).await?;
        let mut pending: Vec<Invitation> = teams
            .iter()
            .flat_map(|t| t.invitations().iter())
            .filter(|i| i.candidate() == user_id && i.is_pending())
            .cloned()
            .collect();
        pending.sort_by_key(|i| i.id());

        Ok(pending)
    }

    async fn load_user(&self, id: UserId) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("user {id} not found")))
    }

    async fn load_team(&self, id: TeamId) -> DomainResult<Team> {
        self.teams
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("team {id} not found")))
    }

    /// Loads the team a user's record points at, checking that the two
    /// sides of the link agree. Disagreement means corrupted state, not a
    /// caller mistake.
    async fn load_team_of(&self, user: &User) -> DomainResult<Team> {
        let team_id = user.team().ok_or_else(|| DomainError::NotOnTeam(user.id()))?;
        let team = self.teams.find_by_id(team_id).await?.ok_or_else(|| {
            DomainError::invariant(format!(
                "user {} is linked to team {team_id}, which does not exist",
                user.id()
            ))
        })?;
        if !team.is_member(user.id()) {
            return Err(DomainError::invariant(format!(
                "user {} is linked to team {team_id} but holds no membership in it",
                user.id()
            )));
        }
        Ok(team)
    }
}
