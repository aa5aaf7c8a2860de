//! AI trait for text-generation operations.
//!
//! Abstracts the external LLM behind the capabilities the pipeline needs:
//! synthetic prospect generation, per-contact sales insights, outreach
//! messages, and batch scoring. Prompt content is an implementation detail,
//! not part of this contract.

use async_trait::async_trait;

use crate::error::AiResult;
use crate::types::{CandidateContact, InsightBundle, OutreachRequest, SearchFilters};

/// Text-generation capabilities used by the pipeline.
#[async_trait]
pub trait ProspectAI: Send + Sync {
    /// Generate plausible but fictitious prospects matching the filters.
    ///
    /// Used as the synthetic fallback tier when every real strategy yields
    /// nothing. Returned records must be tagged `ContactSource::Synthetic`.
    async fn generate_prospects(
        &self,
        filters: &SearchFilters,
        count: usize,
    ) -> AiResult<Vec<CandidateContact>>;

    /// Generate sales insights for one contact.
    async fn generate_insights(&self, contact: &CandidateContact) -> AiResult<InsightBundle>;

    /// Generate an outreach message body for one contact.
    async fn generate_message(
        &self,
        contact: &CandidateContact,
        request: &OutreachRequest,
    ) -> AiResult<String>;

    /// Score a batch of prospects 0-100 by seniority/fit.
    ///
    /// Returns scores positionally; the result may be shorter than the input
    /// when the service answers for fewer records.
    async fn score_batch(&self, contacts: &[CandidateContact]) -> AiResult<Vec<u8>>;
}
