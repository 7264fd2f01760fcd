use serde::{Deserialize, Serialize};

use super::value_objects::Email;
use crate::domain::ids::{TeamId, UserId};

/// A registered platform user.
///
/// Credentials and authentication live with the calling layer; the core
/// sees users as already identified and only tracks which team, if any,
/// each one belongs to. A user belongs to at most one team at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    full_name: String,
    email: Email,
    team: Option<TeamId>,
}

impl User {
    /// Creates a user with no team affiliation.
    pub fn new(id: UserId, full_name: impl Into<String>, email: Email) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email,
            team: None,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    /// The team this user currently belongs to, if any.
    pub fn team(&self) -> Option<TeamId> {
        self.team
    }

    pub fn has_team(&self) -> bool {
        self.team.is_some()
    }

    pub(crate) fn join_team(&mut self, team: TeamId) {
        self.team = Some(team);
    }

    pub(crate) fn leave_team(&mut self) {
        self.team = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::new("dev@example.com").unwrap()
    }

    #[test]
    fn new_user_has_no_team() {
        let user = User::new(UserId::new(1), "Ada Lovelace", email());
        assert_eq!(user.id(), UserId::new(1));
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert!(!user.has_team());
    }

    #[test]
    fn joining_and_leaving_updates_the_link() {
        let mut user = User::new(UserId::new(1), "Ada Lovelace", email());

        user.join_team(TeamId::new(9));
        assert_eq!(user.team(), Some(TeamId::new(9)));

        user.leave_team();
        assert_eq!(user.team(), None);
    }
}
