use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ids::UserId;
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Email, User};

/// Thread-safe in-memory implementation of `UserRepository`
///
/// Useful for testing and development. Data is lost when the process
/// terminates. The table lock is held for the full duration of each call,
/// so every save lands atomically with respect to concurrent readers.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> DomainResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;
        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let users = self
            .users
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id());
        Ok(all)
    }
}
