//! End-to-end membership and succession scenarios, driven through the
//! membership engine against in-memory repositories.

use std::sync::Arc;

use chrono::NaiveDate;
use hackhub_core::domain::error::DomainError;
use hackhub_core::domain::ids::{IdAllocator, TeamId, UserId};
use hackhub_core::domain::repositories::{TeamRepository, UserRepository};
use hackhub_core::domain::team::{Departure, InvitationStatus, TeamEvent};
use hackhub_core::domain::user::{Email, User};
use hackhub_core::infrastructure::clock::FixedClock;
use hackhub_core::infrastructure::repositories::{InMemoryTeamRepository, InMemoryUserRepository};
use hackhub_core::services::MembershipService;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

struct World {
    users: Arc<InMemoryUserRepository>,
    teams: Arc<InMemoryTeamRepository>,
    ids: Arc<IdAllocator>,
    clock: Arc<FixedClock>,
    membership: MembershipService<InMemoryUserRepository, InMemoryTeamRepository>,
}

fn setup() -> World {
    // Surface engine logs when a scenario fails; repeated installs are fine.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let users = Arc::new(InMemoryUserRepository::new());
    let teams = Arc::new(InMemoryTeamRepository::new());
    let ids = Arc::new(IdAllocator::new());
    let clock = Arc::new(FixedClock::new(start_date()));
    let membership = MembershipService::new(
        Arc::clone(&users),
        Arc::clone(&teams),
        Arc::clone(&ids),
        clock.clone(),
    );
    World {
        users,
        teams,
        ids,
        clock,
        membership,
    }
}

async fn register(world: &World, name: &str, email: &str) -> UserId {
    let id = world.ids.next_user_id();
    let user = User::new(id, name, Email::new(email).unwrap());
    world.users.save(&user).await.unwrap();
    id
}

async fn team_of(world: &World, user: UserId) -> Option<TeamId> {
    world
        .users
        .find_by_id(user)
        .await
        .unwrap()
        .unwrap()
        .team()
}

#[tokio::test]
async fn founding_a_team_makes_the_caller_sole_leader() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;

    let (team, events) = world
        .membership
        .create_team(alice, "Corsairs", Some("late-night crew".to_string()))
        .await
        .unwrap();

    assert_eq!(team.leader(), alice);
    assert_eq!(team.member_count(), 1);
    assert_eq!(team.description(), Some("late-night crew"));
    assert_eq!(team_of(&world, alice).await, Some(team.id()));
    assert!(matches!(&events[0], TeamEvent::Created { .. }));
}

#[tokio::test]
async fn a_user_cannot_found_a_second_team() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();

    let err = world
        .membership
        .create_team(alice, "Privateers", None)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::AlreadyOnTeam(alice));
}

#[tokio::test]
async fn team_names_are_unique_among_live_teams() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();

    let err = world
        .membership
        .create_team(bob, "Corsairs", None)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::DuplicateName("Corsairs".to_string()));
}

#[tokio::test]
async fn a_dissolved_teams_name_can_be_reused() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;

    let (first, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    world.membership.depart_team(alice).await.unwrap();

    // The name belonged to a team that no longer exists; the dead team's
    // id, though, stays retired.
    let (second, _) = world
        .membership
        .create_team(bob, "Corsairs", None)
        .await
        .unwrap();
    assert_ne!(second.id(), first.id());
}

#[tokio::test]
async fn dissolution_does_not_recycle_invitation_ids() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (first, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (first_invitation, _) = world
        .membership
        .invite_user(first.id(), alice, bob)
        .await
        .unwrap();
    world.membership.depart_team(alice).await.unwrap();

    // The dissolution rejected Bob's invitation, so he is free to found a
    // successor team and invite Alice back.
    let (second, _) = world
        .membership
        .create_team(bob, "Privateers", None)
        .await
        .unwrap();
    let (second_invitation, _) = world
        .membership
        .invite_user(second.id(), bob, alice)
        .await
        .unwrap();

    assert!(second_invitation.id() > first_invitation.id());
}

#[tokio::test]
async fn invite_then_accept_joins_the_candidate() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();

    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();
    assert!(invitation.is_pending());
    assert_eq!(invitation.sent_on(), start_date());

    let pending = world.membership.pending_invitations_for(bob).await.unwrap();
    assert_eq!(pending.len(), 1);

    let events = world
        .membership
        .accept_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap();
    assert!(matches!(&events[0], TeamEvent::InvitationAccepted { .. }));

    let stored = world.teams.find_by_id(team.id()).await.unwrap().unwrap();
    assert_eq!(stored.member_count(), 2);
    assert!(stored.is_member(bob));
    assert_eq!(
        stored.invitation(invitation.id()).unwrap().status(),
        InvitationStatus::Accepted
    );
    assert_eq!(team_of(&world, bob).await, Some(team.id()));
}

#[tokio::test]
async fn the_response_date_is_the_day_of_the_decision() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();

    let later = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
    world.clock.set(later);
    world
        .membership
        .accept_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap();

    let stored = world.teams.find_by_id(team.id()).await.unwrap().unwrap();
    let inv = stored.invitation(invitation.id()).unwrap();
    assert_eq!(inv.sent_on(), start_date());
    assert_eq!(inv.responded_on(), Some(later));
}

#[tokio::test]
async fn accepting_one_invitation_rejects_the_others() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let carol = register(&world, "Carol", "carol@example.com").await;
    let (team_a, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (team_b, _) = world
        .membership
        .create_team(bob, "Privateers", None)
        .await
        .unwrap();

    let (inv_a, _) = world
        .membership
        .invite_user(team_a.id(), alice, carol)
        .await
        .unwrap();
    let (inv_b, _) = world
        .membership
        .invite_user(team_b.id(), bob, carol)
        .await
        .unwrap();
    assert_eq!(
        world
            .membership
            .pending_invitations_for(carol)
            .await
            .unwrap()
            .len(),
        2
    );

    let events = world
        .membership
        .accept_invitation(carol, team_a.id(), inv_a.id())
        .await
        .unwrap();

    // The competing invitation was auto-declined in the same operation.
    assert!(events.iter().any(|e| matches!(
        e,
        TeamEvent::InvitationRejected { invitation, .. } if *invitation == inv_b.id()
    )));
    let stored_b = world.teams.find_by_id(team_b.id()).await.unwrap().unwrap();
    assert_eq!(
        stored_b.invitation(inv_b.id()).unwrap().status(),
        InvitationStatus::Rejected
    );
    assert_eq!(team_of(&world, carol).await, Some(team_a.id()));
    assert!(world
        .membership
        .pending_invitations_for(carol)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn rejecting_leaves_the_candidate_free() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();

    world
        .membership
        .reject_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap();

    assert_eq!(team_of(&world, bob).await, None);
    // A settled invitation does not block a fresh one.
    assert!(world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .is_ok());
}

#[tokio::test]
async fn a_settled_invitation_cannot_be_answered_again() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();
    world
        .membership
        .reject_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap();

    let err = world
        .membership
        .accept_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));
}

#[tokio::test]
async fn a_rejected_invitation_cannot_be_rejected_again() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();
    world
        .membership
        .reject_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap();

    world.clock.set(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap());
    let err = world
        .membership
        .reject_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));

    // The first response stands, date included.
    let stored = world.teams.find_by_id(team.id()).await.unwrap().unwrap();
    let inv = stored.invitation(invitation.id()).unwrap();
    assert_eq!(inv.status(), InvitationStatus::Rejected);
    assert_eq!(inv.responded_on(), Some(start_date()));
}

#[tokio::test]
async fn an_invitation_only_binds_its_addressee() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let carol = register(&world, "Carol", "carol@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();

    let err = world
        .membership
        .accept_invitation(carol, team.id(), invitation.id())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));
}

#[tokio::test]
async fn only_the_leader_may_invite() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let carol = register(&world, "Carol", "carol@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();
    world
        .membership
        .accept_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap();

    let err = world
        .membership
        .invite_user(team.id(), bob, carol)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::NotAuthorized(bob));
}

#[tokio::test]
async fn a_candidate_already_on_a_team_cannot_be_invited() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (team_b, _) = world
        .membership
        .create_team(bob, "Privateers", None)
        .await
        .unwrap();

    let err = world
        .membership
        .invite_user(team_b.id(), bob, alice)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::AlreadyOnTeam(alice));
}

#[tokio::test]
async fn duplicate_pending_invitations_are_refused() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();

    let err = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicatePending { .. }));
}

#[tokio::test]
async fn a_leader_with_members_but_no_vice_cannot_depart() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();
    world
        .membership
        .accept_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap();

    let err = world.membership.depart_team(alice).await.unwrap_err();
    assert_eq!(err, DomainError::SuccessionRequired(team.id()));

    // Nothing changed: same leader, same members, same affiliation.
    let stored = world.teams.find_by_id(team.id()).await.unwrap().unwrap();
    assert_eq!(stored.leader(), alice);
    assert_eq!(stored.member_count(), 2);
    assert_eq!(team_of(&world, alice).await, Some(team.id()));
}

#[tokio::test]
async fn a_departing_leader_hands_over_to_the_vice() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();
    world
        .membership
        .accept_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap();
    world
        .membership
        .nominate_vice_leader(alice, team.id(), bob)
        .await
        .unwrap();

    let (departure, events) = world.membership.depart_team(alice).await.unwrap();

    assert_eq!(
        departure,
        Departure::LeadershipTransferred { new_leader: bob }
    );
    assert!(events.iter().any(|e| matches!(
        e,
        TeamEvent::LeadershipTransferred { from, to, .. } if *from == alice && *to == bob
    )));

    let stored = world.teams.find_by_id(team.id()).await.unwrap().unwrap();
    assert_eq!(stored.leader(), bob);
    assert_eq!(stored.vice_leader(), None);
    assert!(!stored.is_member(alice));
    assert_eq!(team_of(&world, alice).await, None);
    assert_eq!(team_of(&world, bob).await, Some(team.id()));
}

#[tokio::test]
async fn a_departing_vice_just_leaves() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();
    world
        .membership
        .accept_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap();
    world
        .membership
        .nominate_vice_leader(alice, team.id(), bob)
        .await
        .unwrap();

    let (departure, _) = world.membership.depart_team(bob).await.unwrap();

    assert_eq!(departure, Departure::MemberLeft);
    let stored = world.teams.find_by_id(team.id()).await.unwrap().unwrap();
    assert_eq!(stored.leader(), alice);
    assert_eq!(stored.vice_leader(), None);
    assert_eq!(stored.member_count(), 1);
}

#[tokio::test]
async fn a_sole_leaders_departure_dissolves_the_team() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();

    let (departure, events) = world.membership.depart_team(alice).await.unwrap();

    assert_eq!(departure, Departure::Dissolved);
    assert!(matches!(&events[0], TeamEvent::MemberDeparted { .. }));
    assert!(events.iter().any(|e| matches!(
        e,
        TeamEvent::InvitationRejected { candidate, .. } if *candidate == bob
    )));
    assert!(matches!(events.last(), Some(TeamEvent::Dissolved { .. })));

    assert!(world.teams.find_by_id(team.id()).await.unwrap().is_none());
    assert_eq!(team_of(&world, alice).await, None);
    assert!(world
        .membership
        .pending_invitations_for(bob)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn departing_without_a_team_fails() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;

    let err = world.membership.depart_team(alice).await.unwrap_err();
    assert_eq!(err, DomainError::NotOnTeam(alice));
}

#[tokio::test]
async fn delete_team_requires_the_leader_alone_on_board() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();
    world
        .membership
        .accept_invitation(bob, team.id(), invitation.id())
        .await
        .unwrap();

    // A plain member cannot delete.
    let err = world.membership.delete_team(bob).await.unwrap_err();
    assert_eq!(err, DomainError::NotAuthorized(bob));

    // The leader cannot delete while members remain.
    let err = world.membership.delete_team(alice).await.unwrap_err();
    assert_eq!(err, DomainError::TeamNotEmpty(team.id()));

    // After the member departs, deletion goes through.
    world.membership.depart_team(bob).await.unwrap();
    let events = world.membership.delete_team(alice).await.unwrap();
    assert!(matches!(events.last(), Some(TeamEvent::Dissolved { .. })));
    assert!(world.teams.find_by_id(team.id()).await.unwrap().is_none());
    assert_eq!(team_of(&world, alice).await, None);
}

#[tokio::test]
async fn delete_team_rejects_open_invitations() {
    let world = setup();
    let alice = register(&world, "Alice", "alice@example.com").await;
    let bob = register(&world, "Bob", "bob@example.com").await;
    let (team, _) = world
        .membership
        .create_team(alice, "Corsairs", None)
        .await
        .unwrap();
    let (invitation, _) = world
        .membership
        .invite_user(team.id(), alice, bob)
        .await
        .unwrap();

    let events = world.membership.delete_team(alice).await.unwrap();
    assert!(events.iter().any(|e| matches!(
        e,
        TeamEvent::InvitationRejected { invitation: i, .. } if *i == invitation.id()
    )));
    assert!(world
        .membership
        .pending_invitations_for(bob)
        .await
        .unwrap()
        .is_empty());
}
