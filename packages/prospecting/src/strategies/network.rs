//! Professional-network search strategy.
//!
//! Issues keyword queries against a general web search engine, keeps
//! profile-shaped URLs, and derives contacts from profile slugs plus any
//! snippet text. Since profiles rarely expose addresses, every contact gets
//! a ranked generated email list.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::email::EmailChecker;
use crate::error::Result;
use crate::extract::{ContactExtractor, ExtractionContext};
use crate::traits::searcher::WebSearcher;
use crate::traits::strategy::SourceStrategy;
use crate::types::{CandidateContact, ContactSource, SearchFilters};

const DEFAULT_QUERY: &str = "startup CEO technology site:linkedin.com/in/";

/// How many generated alternates each contact keeps.
const MAX_ALTERNATE_EMAILS: usize = 4;

/// Web-search-backed professional-network discovery.
pub struct NetworkSearchStrategy {
    searcher: Arc<dyn WebSearcher>,
    extractor: Arc<ContactExtractor>,
    checker: Arc<EmailChecker>,
    max_profiles: usize,
    results_per_query: usize,
}

impl NetworkSearchStrategy {
    pub fn new(
        searcher: Arc<dyn WebSearcher>,
        extractor: Arc<ContactExtractor>,
        checker: Arc<EmailChecker>,
    ) -> Self {
        Self {
            searcher,
            extractor,
            checker,
            max_profiles: 15,
            results_per_query: 10,
        }
    }

    /// Cap on profiles collected per search.
    pub fn with_max_profiles(mut self, max: usize) -> Self {
        self.max_profiles = max;
        self
    }

    /// Compose up to three queries from the filters, different angles each.
    fn build_queries(&self, filters: &SearchFilters) -> Vec<String> {
        let position = filters.primary_position().unwrap_or_default();
        let industry = filters.primary_industry().unwrap_or_default();
        let location = filters.location.trim();
        let keywords = filters.keywords.trim();

        let mut queries = Vec::new();

        if !position.is_empty() || !industry.is_empty() {
            queries.push(collapse_spaces(&format!(
                "{} {} {} site:linkedin.com/in/",
                position, industry, location
            )));
        }
        if !position.is_empty() && !industry.is_empty() {
            queries.push(collapse_spaces(&format!(
                "\"{}\" \"{}\" {} linkedin",
                position, industry, location
            )));
        }
        if !keywords.is_empty() {
            queries.push(collapse_spaces(&format!(
                "{} {} {} site:linkedin.com/in/",
                keywords, position, location
            )));
        }

        if queries.is_empty() {
            queries.push(DEFAULT_QUERY.to_string());
        }
        queries.dedup();
        queries
    }
}

/// Whether a URL looks like a personal profile rather than a listing page.
pub fn is_profile_url(url: &str) -> bool {
    url.contains("linkedin.com/in/")
        && !url.contains("/dir/")
        && !url.contains("/company/")
        && url.len() < 200
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl SourceStrategy for NetworkSearchStrategy {
    async fn discover(&self, filters: &SearchFilters) -> Result<Vec<CandidateContact>> {
        let queries = self.build_queries(filters);
        let mut contacts: Vec<CandidateContact> = Vec::new();
        let mut seen_profiles = HashSet::new();

        for query in queries {
            if contacts.len() >= self.max_profiles {
                break;
            }

            debug!(query = %query, "network profile search");
            let hits = match self.searcher.search(&query, self.results_per_query).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(query = %query, error = %e, "profile search failed");
                    continue;
                }
            };

            for hit in hits {
                if contacts.len() >= self.max_profiles {
                    break;
                }

                let url = hit.url.to_string();
                if !is_profile_url(&url) {
                    continue;
                }

                let ctx = ExtractionContext::for_filters(self.source(), filters);
                let Some(mut contact) =
                    self.extractor
                        .extract_from_profile_url(&url, &hit.context_text(), &ctx)
                else {
                    continue;
                };

                let profile_key = contact.linkedin_url.clone().unwrap_or_else(|| url.clone());
                if !seen_profiles.insert(profile_key) {
                    continue;
                }

                let ranked = self.checker.rank_candidates(
                    &contact.first_name,
                    &contact.last_name,
                    &contact.company,
                );
                if let Some(top) = ranked.first() {
                    contact.email = Some(top.email.clone());
                }
                contact.alternate_emails = ranked
                    .into_iter()
                    .skip(1)
                    .take(MAX_ALTERNATE_EMAILS)
                    .map(|r| r.email)
                    .collect();

                contacts.push(contact);
            }
        }

        Ok(contacts)
    }

    fn name(&self) -> &'static str {
        "professional-network"
    }

    fn source(&self) -> ContactSource {
        ContactSource::WebSearch
    }
}
