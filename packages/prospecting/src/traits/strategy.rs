//! Source strategy trait: one acquisition channel per implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CandidateContact, ContactSource, SearchFilters};

/// One data-acquisition channel.
///
/// Strategies are interchangeable and ordered by reliability/cost by the
/// orchestrator. Implementations must swallow per-fetch failures internally
/// (log, treat as zero yield); a returned error is allowed but the
/// orchestrator treats it the same as an empty result. The requested limit is
/// an upper bound on cost, not a hard truncation; final truncation belongs
/// to the orchestrator.
#[async_trait]
pub trait SourceStrategy: Send + Sync {
    /// Discover candidate contacts for the given filters.
    async fn discover(&self, filters: &SearchFilters) -> Result<Vec<CandidateContact>>;

    /// Strategy name (for logging and tests).
    fn name(&self) -> &'static str;

    /// Source tag applied to produced records.
    fn source(&self) -> ContactSource;
}
