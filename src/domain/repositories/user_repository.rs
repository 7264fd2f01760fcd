use async_trait::async_trait;

use crate::domain::error::DomainResult;
use crate::domain::ids::UserId;
use crate::domain::user::{Email, User};

/// Repository trait for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a user (insert or update)
    async fn save(&self, user: &User) -> DomainResult<()>;

    /// Find a user by ID
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    /// List all registered users
    async fn list(&self) -> DomainResult<Vec<User>>;
}
