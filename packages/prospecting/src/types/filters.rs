//! Search filters: the input to the whole pipeline.

use serde::{Deserialize, Serialize};

/// Default result cap when the caller does not specify one.
pub const DEFAULT_LIMIT: usize = 20;

/// Smallest accepted result cap.
pub const MIN_LIMIT: usize = 1;

/// Largest accepted result cap.
pub const MAX_LIMIT: usize = 50;

/// Search filters for a discovery request.
///
/// At least one of industries, positions, or keywords should be non-empty for
/// a meaningful search, but the pipeline never fails on all-empty filters; it
/// degrades to defaults instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Target industries (may be empty).
    pub industries: Vec<String>,

    /// Target job positions (may be empty).
    pub positions: Vec<String>,

    /// Free-text location, e.g. "Austin, TX".
    pub location: String,

    /// Free-text company size, e.g. "51-200 employees".
    pub company_size: String,

    /// Free-text keywords.
    pub keywords: String,

    /// Requested result cap. Clamped to [1, 50] by the orchestrator.
    pub limit: usize,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            industries: Vec::new(),
            positions: Vec::new(),
            location: String::new(),
            company_size: String::new(),
            keywords: String::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchFilters {
    /// Create empty filters with the default limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an industry.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industries.push(industry.into());
        self
    }

    /// Add a position.
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.positions.push(position.into());
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the keywords.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    /// Set the result cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The requested limit clamped to the accepted range.
    pub fn clamped_limit(&self) -> usize {
        self.limit.clamp(MIN_LIMIT, MAX_LIMIT)
    }

    /// Whether the limit is inside the accepted range as given.
    pub fn limit_in_range(&self) -> bool {
        (MIN_LIMIT..=MAX_LIMIT).contains(&self.limit)
    }

    /// First industry, if any.
    pub fn primary_industry(&self) -> Option<&str> {
        self.industries.first().map(String::as_str)
    }

    /// First position, if any.
    pub fn primary_position(&self) -> Option<&str> {
        self.positions.first().map(String::as_str)
    }

    /// True when none of industries, positions, or keywords constrain the search.
    pub fn is_unconstrained(&self) -> bool {
        self.industries.is_empty() && self.positions.is_empty() && self.keywords.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit() {
        let filters = SearchFilters::new();
        assert_eq!(filters.limit, DEFAULT_LIMIT);
        assert!(filters.is_unconstrained());
    }

    #[test]
    fn test_clamped_limit() {
        assert_eq!(SearchFilters::new().with_limit(0).clamped_limit(), 1);
        assert_eq!(SearchFilters::new().with_limit(500).clamped_limit(), 50);
        assert_eq!(SearchFilters::new().with_limit(20).clamped_limit(), 20);
    }

    #[test]
    fn test_deserialize_defaults() {
        let filters: SearchFilters = serde_json::from_str("{}").unwrap();
        assert_eq!(filters.limit, DEFAULT_LIMIT);
        assert!(filters.industries.is_empty());

        let filters: SearchFilters =
            serde_json::from_str(r#"{"positions":["CEO"],"location":"Austin, TX","limit":5}"#)
                .unwrap();
        assert_eq!(filters.primary_position(), Some("CEO"));
        assert_eq!(filters.limit, 5);
        assert!(!filters.is_unconstrained());
    }
}
