// Infrastructure layer module
// Contains adapters for the domain's ports (storage, clock)
// Follows Hexagonal Architecture

pub mod clock;
pub mod repositories;
