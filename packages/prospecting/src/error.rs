//! Typed errors for the prospecting library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during discovery operations.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Fetch operation failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// AI service unavailable or failed
    #[error("AI service error: {0}")]
    Ai(#[from] AiError),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Invalid search filters provided
    #[error("invalid filters: {reason}")]
    InvalidFilters { reason: String },

    /// Outreach message generation failed.
    ///
    /// Unlike insights, there is no safe generic substitute for outbound
    /// message content, so this is surfaced to the caller.
    #[error("generation failed")]
    MessageGeneration,

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Errors that can occur while fetching pages or search results.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-success HTTP status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Connection timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

/// Errors from the external text-generation service.
#[derive(Debug, Error)]
pub enum AiError {
    /// Network-level failure reaching the service
    #[error("AI request failed: {0}")]
    Network(String),

    /// The service returned an error response
    #[error("AI service error: {0}")]
    Api(String),

    /// The response could not be parsed into the expected shape.
    ///
    /// Treated identically to a service failure at every call site.
    #[error("AI response parse error: {0}")]
    Parse(String),

    /// Missing or invalid configuration (e.g. no API key)
    #[error("AI config error: {0}")]
    Config(String),
}

/// Errors from the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend operation failed
    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Prospect not found
    #[error("prospect not found: {id}")]
    NotFound { id: Uuid },
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for AI operations.
pub type AiResult<T> = std::result::Result<T, AiError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
