//! Prospect discovery and enrichment pipeline.
//!
//! Given a set of search filters, produces a deduplicated, scored, ranked
//! list of prospect records by trying several data-acquisition strategies in
//! order and falling back gracefully: real strategies first, an LLM-backed
//! synthetic generator when all of them come up dry, and a small static
//! record set as the floor. The caller always receives a non-empty, tagged
//! result for a well-formed request.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use prospecting::{
//!     ContactExtractor, DirectoryStrategy, DiscoveryOrchestrator, DnsMxResolver,
//!     EmailChecker, HttpFetcher, SearchFilters,
//! };
//!
//! let fetcher = Arc::new(HttpFetcher::new());
//! let extractor = Arc::new(ContactExtractor::new());
//! let checker = Arc::new(EmailChecker::new(Arc::new(DnsMxResolver::new())));
//!
//! let orchestrator = DiscoveryOrchestrator::new(
//!     vec![Arc::new(DirectoryStrategy::new(fetcher, extractor))],
//!     checker,
//! );
//!
//! let filters = SearchFilters::new().with_position("CEO").with_limit(10);
//! let result = orchestrator.discover(&filters).await;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Filters, contacts, prospects, insight bundles
//! - [`traits`] - Seams: strategies, searcher, fetcher, AI, store
//! - [`email`] - Plausibility checking and candidate ranking
//! - [`extract`] - Pattern-heuristic contact extraction
//! - [`fetchers`] - Page fetching over plain HTTP
//! - [`strategies`] - The three acquisition channels
//! - [`pipeline`] - Dedup, scoring, fallback, orchestration
//! - [`ai`] - OpenAI-backed enrichment and the insight service
//! - [`stores`] - Persistence backends
//! - [`testing`] - Mock implementations for tests

pub mod ai;
pub mod email;
pub mod error;
pub mod extract;
pub mod fetchers;
pub mod pipeline;
pub mod stores;
pub mod strategies;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{AiError, DiscoveryError, FetchError, Result, StoreError};
pub use types::{
    CandidateContact, ContactSource, DiscoveryResult, EmailValidation, InsightBundle,
    MessageChannel, MessageTone, OutreachMessage, OutreachRequest, ScoredProspect, SearchFilters,
};

// Re-export the pipeline surface
pub use pipeline::{DiscoveryOrchestrator, OrchestratorConfig, SyntheticGenerator};

// Re-export collaborators
pub use ai::{InsightService, OpenAiProspectAI};
pub use email::{DnsMxResolver, EmailChecker, RankedEmail};
pub use extract::{ContactExtractor, ExtractionContext};
pub use fetchers::HttpFetcher;
pub use strategies::{CompanySiteStrategy, DirectoryStrategy, NetworkSearchStrategy};
pub use traits::{
    DuckDuckGoSearcher, FetchedPage, InsertOutcome, PageFetcher, ProspectAI, ProspectStore,
    SearchHit, SourceStrategy, WebSearcher,
};

// Re-export stores
pub use stores::MemoryStore;

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;
