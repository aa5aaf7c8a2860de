//! Persistence boundary for scored prospects.
//!
//! The pipeline itself keeps records transient per-request; the calling layer
//! decides what to persist. The store contract is check-then-insert: a
//! prospect matching an existing record by email or by the
//! (first, last, company) triple is reported as already existing so the
//! caller can merge. No transactional guarantees beyond that are required.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::types::ScoredProspect;

/// Outcome of a check-then-insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The prospect was new and has been stored.
    Inserted,
    /// A matching record already exists under the given id.
    AlreadyExists(Uuid),
}

/// Prospect persistence.
#[async_trait]
pub trait ProspectStore: Send + Sync {
    /// Insert unless a record matches by normalized email or by the
    /// normalized (first, last, company) triple.
    async fn insert_if_new(&self, prospect: &ScoredProspect) -> StoreResult<InsertOutcome>;

    /// Fetch a prospect by id.
    async fn get(&self, id: Uuid) -> StoreResult<Option<ScoredProspect>>;

    /// Number of stored prospects.
    async fn count(&self) -> StoreResult<usize>;
}
