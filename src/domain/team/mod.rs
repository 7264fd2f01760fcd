// Team domain module
// Contains the team aggregate root, its child entities, and domain events

#![allow(clippy::module_inception)]

pub mod enrollment;
pub mod events;
pub mod invitation;
pub mod team;

// Re-export main types for convenience
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use events::TeamEvent;
pub use invitation::{Invitation, InvitationStatus};
pub use team::{Departure, Membership, Team};
