// Service layer module
// Engines that orchestrate the domain aggregates across repositories
//
// Every operation is atomic-or-nothing: preconditions are checked against
// loaded copies, mutations happen on those copies, and only then is
// anything saved. When a cascade touches several teams, the secondary
// saves land before the primary one.

pub mod enrollment;
pub mod membership;

// Re-export main types for convenience
pub use enrollment::EnrollmentService;
pub use membership::MembershipService;
