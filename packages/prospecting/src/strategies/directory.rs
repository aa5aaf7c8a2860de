//! Business-directory strategy.
//!
//! Queries a structured business-listing source for companies matching
//! industry/location/keywords, then applies the contact extractor to each
//! listed company's site.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::error::Result;
use crate::extract::{ContactExtractor, ExtractionContext};
use crate::traits::fetcher::PageFetcher;
use crate::traits::strategy::SourceStrategy;
use crate::types::{CandidateContact, ContactSource, SearchFilters};

const DEFAULT_LISTING_BASE: &str = "https://www.yellowpages.com/search";

/// Directory-backed discovery.
pub struct DirectoryStrategy {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<ContactExtractor>,
    listing_base: String,
    max_companies: usize,
}

impl DirectoryStrategy {
    pub fn new(fetcher: Arc<dyn PageFetcher>, extractor: Arc<ContactExtractor>) -> Self {
        Self {
            fetcher,
            extractor,
            listing_base: DEFAULT_LISTING_BASE.to_string(),
            max_companies: 5,
        }
    }

    /// Override the listing endpoint (for tests).
    pub fn with_listing_base(mut self, base: impl Into<String>) -> Self {
        self.listing_base = base.into();
        self
    }

    /// Cap on company sites visited per search.
    pub fn with_max_companies(mut self, max: usize) -> Self {
        self.max_companies = max;
        self
    }

    fn listing_url(&self, filters: &SearchFilters) -> Option<Url> {
        let mut terms = Vec::new();
        if !filters.keywords.trim().is_empty() {
            terms.push(filters.keywords.trim().to_string());
        }
        terms.extend(filters.industries.iter().map(|i| i.trim().to_string()));

        let search_terms = if terms.is_empty() {
            "business".to_string()
        } else {
            terms.join(" ")
        };

        let mut url = Url::parse(&self.listing_base).ok()?;
        url.query_pairs_mut()
            .append_pair("search_terms", &search_terms)
            .append_pair("geo_location_terms", filters.location.trim());
        Some(url)
    }

    /// Parse listing cards into (business name, website) pairs.
    fn parse_listings(&self, html: &str) -> Vec<(String, String)> {
        let name_re = regex::Regex::new(
            r#"(?is)<a[^>]*class="[^"]*business-name[^"]*"[^>]*>(?:\s*<span[^>]*>)?([^<]+)"#,
        )
        .unwrap();
        let website_re = regex::Regex::new(
            r#"(?is)<a[^>]*class="[^"]*track-visit-website[^"]*"[^>]*href="([^"]+)""#,
        )
        .unwrap();

        let names: Vec<String> = name_re
            .captures_iter(html)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect();
        let websites: Vec<String> = website_re
            .captures_iter(html)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect();

        names
            .into_iter()
            .zip(websites)
            .filter(|(name, website)| !name.is_empty() && website.starts_with("http"))
            .collect()
    }
}

#[async_trait]
impl SourceStrategy for DirectoryStrategy {
    async fn discover(&self, filters: &SearchFilters) -> Result<Vec<CandidateContact>> {
        let Some(listing_url) = self.listing_url(filters) else {
            return Ok(Vec::new());
        };

        debug!(url = %listing_url, "directory search starting");

        let listing_page = match self.fetcher.fetch(listing_url.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "directory listing fetch failed");
                return Ok(Vec::new());
            }
        };

        let listings = self.parse_listings(&listing_page.html);
        debug!(listings = listings.len(), "directory listings parsed");

        let mut contacts = Vec::new();
        for (company, website) in listings.into_iter().take(self.max_companies) {
            let page = match self.fetcher.fetch(&website).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(url = %website, error = %e, "company site fetch failed");
                    continue;
                }
            };

            let mut ctx = ExtractionContext::for_filters(self.source(), filters)
                .with_url(page.final_url.clone())
                .with_company(company);
            if let Some(title) = &page.title {
                ctx = ctx.with_page_title(title.clone());
            }

            contacts.extend(self.extractor.extract(&page.text, &ctx));
        }

        Ok(contacts)
    }

    fn name(&self) -> &'static str {
        "directory"
    }

    fn source(&self) -> ContactSource {
        ContactSource::Directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    #[test]
    fn test_parse_listings_pairs_names_and_websites() {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(MockFetcher::new());
        let strategy = DirectoryStrategy::new(fetcher, Arc::new(ContactExtractor::new()));

        let html = r#"
            <a class="business-name" href="/biz/1"><span>Acme Plumbing</span></a>
            <a class="track-visit-website" href="https://acmeplumbing.com">Website</a>
            <a class="business-name" href="/biz/2"><span>Best Pipes</span></a>
            <a class="track-visit-website" href="https://bestpipes.com">Website</a>
        "#;

        let listings = strategy.parse_listings(html);
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].0, "Acme Plumbing");
        assert_eq!(listings[0].1, "https://acmeplumbing.com");
    }

    #[tokio::test]
    async fn test_discover_extracts_from_company_sites() {
        let listing_html = r#"
            <a class="business-name"><span>Acme Corp</span></a>
            <a class="track-visit-website" href="https://acme.test/">Website</a>
        "#;
        let company_html = r#"
            <html><head><title>Acme Corp</title></head>
            <body><p>Jane Doe, CEO. Email: jane.doe@acme.test</p></body></html>
        "#;

        let fetcher = MockFetcher::new()
            .with_page(
                "https://www.yellowpages.com/search?search_terms=plumbing&geo_location_terms=Austin%2C+TX",
                listing_html,
            )
            .with_page("https://acme.test/", company_html);

        let strategy = DirectoryStrategy::new(Arc::new(fetcher), Arc::new(ContactExtractor::new()));
        let filters = SearchFilters::new()
            .with_keywords("plumbing")
            .with_location("Austin, TX");

        let contacts = strategy.discover(&filters).await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].full_name(), "Jane Doe");
        assert_eq!(contacts[0].company, "Acme Corp");
        assert_eq!(contacts[0].source, ContactSource::Directory);
    }

    #[tokio::test]
    async fn test_network_failure_yields_empty_not_error() {
        let strategy = DirectoryStrategy::new(
            Arc::new(MockFetcher::new().failing()),
            Arc::new(ContactExtractor::new()),
        );

        let contacts = strategy
            .discover(&SearchFilters::new().with_keywords("plumbing"))
            .await
            .unwrap();
        assert!(contacts.is_empty());
    }
}
