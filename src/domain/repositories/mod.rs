// Repository ports for the domain layer
// Adapters implementing these traits live under infrastructure

pub mod hackathon_repository;
pub mod team_repository;
pub mod user_repository;

// Re-export main types for convenience
pub use hackathon_repository::HackathonRepository;
pub use team_repository::TeamRepository;
pub use user_repository::UserRepository;
