// Hackathon domain module
// Contains the hackathon aggregate root and its value objects

#![allow(clippy::module_inception)]

pub mod hackathon;
pub mod value_objects;

// Re-export main types for convenience
pub use hackathon::{EnrollmentRef, Hackathon, DEFAULT_MAX_TEAM_SIZE};
pub use value_objects::HackathonStatus;
