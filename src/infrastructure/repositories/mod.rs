// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory_hackathon_repository;
pub mod memory_team_repository;
pub mod memory_user_repository;

pub use memory_hackathon_repository::InMemoryHackathonRepository;
pub use memory_team_repository::InMemoryTeamRepository;
pub use memory_user_repository::InMemoryUserRepository;
