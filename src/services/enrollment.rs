use std::sync::Arc;

use tracing::info;

use crate::domain::clock::Clock;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hackathon::Hackathon;
use crate::domain::ids::{EnrollmentId, HackathonId, IdAllocator, TeamId, UserId};
use crate::domain::repositories::{HackathonRepository, TeamRepository};
use crate::domain::team::{Enrollment, Team, TeamEvent};

/// Enrollment engine
///
/// Registers teams into hackathons and manages the enrollment lifecycle
/// afterwards. Validation runs entirely up front; the team aggregate and
/// the hackathon's participant roster are only written once every check
/// has passed.
pub struct EnrollmentService<T, H>
where
    T: TeamRepository,
    H: HackathonRepository,
{
    teams: Arc<T>,
    hackathons: Arc<H>,
    ids: Arc<IdAllocator>,
    clock: Arc<dyn Clock>,
}

impl<T, H> EnrollmentService<T, H>
where
    T: TeamRepository,
    H: HackathonRepository,
{
    /// Create a new enrollment service
    pub fn new(
        teams: Arc<T>,
        hackathons: Arc<H>,
        ids: Arc<IdAllocator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            teams,
            hackathons,
            ids,
            clock,
        }
    }

    /// Enrolls `team_id` into `hackathon_id`
    ///
    /// Checks run in a fixed order, so when several preconditions fail at
    /// once the caller sees the same error every time:
    /// authorization, duplicate enrollment, enrollment window, team size.
    ///
    /// # Errors
    /// - `NotAuthorized` if `caller` is not the team's leader
    /// - `AlreadyEnrolled` if the team holds a confirmed enrollment in
    ///   this hackathon (withdrawn or disqualified ones do not count)
    /// - `EnrollmentClosed` if the lifecycle moved on or the deadline day
    ///   has passed
    /// - `TeamTooLarge` if the member count exceeds the hackathon's cap
    pub async fn enroll(
        &self,
        caller: UserId,
        team_id: TeamId,
        hackathon_id: HackathonId,
    ) -> DomainResult<(Enrollment, Vec<TeamEvent>)> {
        info!(team = %team_id, hackathon = %hackathon_id, caller = %caller, "enrolling team");

        let mut team = self.load_team(team_id).await?;
        team.ensure_leader(caller)?;
        let mut hackathon = self.load_hackathon(hackathon_id).await?;

        if team.has_active_enrollment(hackathon_id) {
            return Err(DomainError::AlreadyEnrolled {
                team: team_id,
                hackathon: hackathon_id,
            });
        }

        let today = self.clock.today();
        if !hackathon.is_enrollment_open(today) {
            return Err(DomainError::EnrollmentClosed(hackathon_id));
        }

        let size = team.member_count();
        if size > hackathon.max_team_size() {
            return Err(DomainError::TeamTooLarge {
                team: team_id,
                size,
                max: hackathon.max_team_size(),
            });
        }

        let id = self.ids.next_enrollment_id();
        let enrollment = Enrollment::new(id, team_id, hackathon_id, today);
        let event = team.record_enrollment(enrollment.clone());
        hackathon.link_enrollment(id, team_id);

        self.teams.save(&team).await?;
        self.hackathons.save(&hackathon).await?;

        Ok((enrollment, vec![event]))
    }

    /// Withdraws a confirmed enrollment at the leader's request
    ///
    /// The enrollment record stays on the team as history; only its status
    /// changes. The hackathon's roster keeps the back-link.
    ///
    /// # Errors
    /// - `NotAuthorized` if `caller` is not the team's leader
    /// - `InvalidState` if the enrollment is no longer confirmed
    pub async fn withdraw(
        &self,
        caller: UserId,
        team_id: TeamId,
        enrollment_id: EnrollmentId,
    ) -> DomainResult<Vec<TeamEvent>> {
        info!(team = %team_id, enrollment = %enrollment_id, "withdrawing enrollment");

        let mut team = self.load_team(team_id).await?;
        team.ensure_leader(caller)?;
        team.enrollment_mut(enrollment_id)?.withdraw()?;

        let event = TeamEvent::EnrollmentWithdrawn {
            team: team_id,
            enrollment: enrollment_id,
        };
        self.teams.save(&team).await?;

        Ok(vec![event])
    }

    /// Disqualifies a confirmed enrollment
    ///
    /// Reserved for the event organizer; verifying that authority is the
    /// calling layer's responsibility, which is why no caller id appears
    /// here.
    ///
    /// # Errors
    /// - `InvalidState` if the enrollment is no longer confirmed
    pub async fn disqualify(
        &self,
        team_id: TeamId,
        enrollment_id: EnrollmentId,
    ) -> DomainResult<Vec<TeamEvent>> {
        info!(team = %team_id, enrollment = %enrollment_id, "disqualifying enrollment");

        let mut team = self.load_team(team_id).await?;
        team.enrollment_mut(enrollment_id)?.disqualify()?;

        let event = TeamEvent::EnrollmentDisqualified {
            team: team_id,
            enrollment: enrollment_id,
        };
        self.teams.save(&team).await?;

        Ok(vec![event])
    }

    async fn load_team(&self, id: TeamId) -> DomainResult<Team> {
        self.teams
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("team {id} not found")))
    }

    async fn load_hackathon(&self, id: HackathonId) -> DomainResult<Hackathon> {
        self.hackathons
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("hackathon {id} not found")))
    }
}
