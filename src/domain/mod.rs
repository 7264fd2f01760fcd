// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod clock;
pub mod error;
pub mod hackathon;
pub mod ids;
pub mod repositories;
pub mod team;
pub mod user;

// Re-export main types for convenience
pub use clock::Clock;
pub use error::{DomainError, DomainResult};
