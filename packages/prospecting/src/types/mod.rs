//! Data types for the prospecting pipeline.

pub mod contact;
pub mod filters;
pub mod insights;

pub use contact::{
    CandidateContact, ContactSource, DiscoveryResult, EmailValidation, ScoredProspect,
    PLACEHOLDER_FIRST_NAME, PLACEHOLDER_LAST_NAME,
};
pub use filters::{SearchFilters, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
pub use insights::{InsightBundle, MessageChannel, MessageTone, OutreachMessage, OutreachRequest};
