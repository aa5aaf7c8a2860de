//! Core trait abstractions.

pub mod ai;
pub mod fetcher;
pub mod searcher;
pub mod store;
pub mod strategy;

pub use ai::ProspectAI;
pub use fetcher::{FetchedPage, PageFetcher};
pub use searcher::{DuckDuckGoSearcher, MockWebSearcher, SearchHit, WebSearcher};
pub use store::{InsertOutcome, ProspectStore};
pub use strategy::SourceStrategy;
