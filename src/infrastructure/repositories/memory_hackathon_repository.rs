use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hackathon::Hackathon;
use crate::domain::ids::HackathonId;
use crate::domain::repositories::HackathonRepository;

/// Thread-safe in-memory implementation of `HackathonRepository`
///
/// Useful for testing and development. Data is lost when the process
/// terminates.
#[derive(Debug, Default)]
pub struct InMemoryHackathonRepository {
    hackathons: RwLock<HashMap<HackathonId, Hackathon>>,
}

impl InMemoryHackathonRepository {
    /// Creates an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HackathonRepository for InMemoryHackathonRepository {
    async fn save(&self, hackathon: &Hackathon) -> DomainResult<()> {
        let mut hackathons = self
            .hackathons
            .write()
            .map_err(|e| DomainError::storage(format!("failed to acquire write lock: {e}")))?;
        hackathons.insert(hackathon.id(), hackathon.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: HackathonId) -> DomainResult<Option<Hackathon>> {
        let hackathons = self
            .hackathons
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;
        Ok(hackathons.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Hackathon>> {
        let hackathons = self
            .hackathons
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;
        let mut all: Vec<Hackathon> = hackathons.values().cloned().collect();
        all.sort_by_key(|h| h.id());
        Ok(all)
    }

    async fn find_enrolling(&self, today: NaiveDate) -> DomainResult<Vec<Hackathon>> {
        let hackathons = self
            .hackathons
            .read()
            .map_err(|e| DomainError::storage(format!("failed to acquire read lock: {e}")))?;
        let mut open: Vec<Hackathon> = hackathons
            .values()
            .filter(|h| h.is_enrollment_open(today))
            .cloned()
            .collect();
        open.sort_by_key(|h| h.id());
        Ok(open)
    }
}
