use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::error::DomainResult;
use crate::domain::hackathon::Hackathon;
use crate::domain::ids::HackathonId;

/// Repository trait for the Hackathon aggregate
#[async_trait]
pub trait HackathonRepository: Send + Sync {
    /// Save a hackathon (insert or update)
    async fn save(&self, hackathon: &Hackathon) -> DomainResult<()>;

    /// Find a hackathon by ID
    async fn find_by_id(&self, id: HackathonId) -> DomainResult<Option<Hackathon>>;

    /// List all hackathons
    async fn list(&self) -> DomainResult<Vec<Hackathon>>;

    /// List hackathons whose enrollment window is open as of `today`
    async fn find_enrolling(&self, today: NaiveDate) -> DomainResult<Vec<Hackathon>>;
}
