//! Direct company-site strategy.
//!
//! Discovers company sites via general web search, then crawls each site's
//! root plus any team/about/leadership-labelled pages, applying the contact
//! extractor to every page visited. Bounded to a few pages per site and a
//! few sites per search.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::error::Result;
use crate::extract::{ContactExtractor, ExtractionContext};
use crate::traits::fetcher::{FetchedPage, PageFetcher};
use crate::traits::searcher::WebSearcher;
use crate::traits::strategy::SourceStrategy;
use crate::types::{CandidateContact, ContactSource, SearchFilters};

/// Anchor-text vocabulary marking pages likely to list people.
pub const TEAM_LINK_WORDS: &[&str] = &["team", "about", "leadership", "staff", "contact", "people"];

/// Hosts that are never company sites.
const EXCLUDED_HOSTS: &[&str] = &[
    "linkedin.com",
    "facebook.com",
    "twitter.com",
    "wikipedia.org",
    "youtube.com",
];

/// Crawl-backed company-site discovery.
pub struct CompanySiteStrategy {
    searcher: Arc<dyn WebSearcher>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<ContactExtractor>,
    max_sites: usize,
    max_pages_per_site: usize,
}

impl CompanySiteStrategy {
    pub fn new(
        searcher: Arc<dyn WebSearcher>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<ContactExtractor>,
    ) -> Self {
        Self {
            searcher,
            fetcher,
            extractor,
            max_sites: 5,
            max_pages_per_site: 3,
        }
    }

    /// Cap on sites visited per search.
    pub fn with_max_sites(mut self, max: usize) -> Self {
        self.max_sites = max;
        self
    }

    /// Cap on followed pages per site, beyond the root.
    pub fn with_max_pages_per_site(mut self, max: usize) -> Self {
        self.max_pages_per_site = max;
        self
    }

    fn build_query(&self, filters: &SearchFilters) -> String {
        let query = format!(
            "{} companies {} {}",
            filters.industries.join(" "),
            filters.location.trim(),
            filters.keywords.trim()
        );
        let query = query.split_whitespace().collect::<Vec<_>>().join(" ");
        if query == "companies" {
            "business companies".to_string()
        } else {
            query
        }
    }

    fn extract_page(
        &self,
        page: &FetchedPage,
        filters: &SearchFilters,
    ) -> Vec<CandidateContact> {
        let mut ctx = ExtractionContext::for_filters(self.source(), filters)
            .with_url(page.final_url.clone());
        if let Some(title) = &page.title {
            ctx = ctx.with_page_title(title.clone());
        }
        self.extractor.extract(&page.text, &ctx)
    }

    /// Team/about/leadership-labelled links on a page, deduplicated.
    fn team_links(&self, page: &FetchedPage) -> Vec<String> {
        let mut seen = HashSet::new();
        page.links()
            .into_iter()
            .filter(|link| {
                let text = link.text.to_lowercase();
                TEAM_LINK_WORDS.iter().any(|w| text.contains(w))
            })
            .filter(|link| seen.insert(link.url.clone()))
            .map(|link| link.url)
            .take(self.max_pages_per_site)
            .collect()
    }
}

/// Whether a search hit plausibly points at a company's own site.
pub fn is_business_site(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    host.contains('.') && !EXCLUDED_HOSTS.iter().any(|h| host.ends_with(h))
}

#[async_trait]
impl SourceStrategy for CompanySiteStrategy {
    async fn discover(&self, filters: &SearchFilters) -> Result<Vec<CandidateContact>> {
        let query = self.build_query(filters);
        debug!(query = %query, "company site search");

        let hits = match self.searcher.search(&query, 10).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(query = %query, error = %e, "company search failed");
                return Ok(Vec::new());
            }
        };

        let sites: Vec<_> = hits
            .into_iter()
            .filter(|hit| is_business_site(&hit.url))
            .take(self.max_sites)
            .collect();

        let mut contacts = Vec::new();
        for site in sites {
            let root = match self.fetcher.fetch(site.url.as_str()).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(url = %site.url, error = %e, "site root fetch failed");
                    continue;
                }
            };

            contacts.extend(self.extract_page(&root, filters));

            for link in self.team_links(&root) {
                match self.fetcher.fetch(&link).await {
                    Ok(page) => contacts.extend(self.extract_page(&page, filters)),
                    Err(e) => warn!(url = %link, error = %e, "team page fetch failed"),
                }
            }
        }

        Ok(contacts)
    }

    fn name(&self) -> &'static str {
        "company-site"
    }

    fn source(&self) -> ContactSource {
        ContactSource::CompanySite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockFetcher, MockWebSearcher};
    use crate::traits::searcher::SearchHit;

    #[test]
    fn test_is_business_site() {
        let check = |u: &str| is_business_site(&Url::parse(u).unwrap());
        assert!(check("https://acme.com/"));
        assert!(!check("https://www.linkedin.com/company/acme"));
        assert!(!check("https://en.wikipedia.org/wiki/Acme"));
    }

    #[tokio::test]
    async fn test_discover_follows_team_pages() {
        let root_html = r#"
            <html><head><title>Acme Corp</title></head><body>
            <a href="/team">Meet the Team</a>
            <a href="/pricing">Pricing</a>
            </body></html>
        "#;
        let team_html = r#"
            <html><head><title>Acme Corp | Team</title></head><body>
            <p>Jane Doe, CEO</p>
            <p>Director: Alan Smith</p>
            </body></html>
        "#;

        let searcher = MockWebSearcher::new()
            .with_default_results(vec![SearchHit::from_url("https://acme.test/").unwrap()]);
        let fetcher = MockFetcher::new()
            .with_page("https://acme.test/", root_html)
            .with_page("https://acme.test/team", team_html);

        let strategy = CompanySiteStrategy::new(
            Arc::new(searcher),
            Arc::new(fetcher),
            Arc::new(ContactExtractor::new()),
        );

        let filters = SearchFilters::new()
            .with_industry("Technology")
            .with_location("Austin, TX");
        let contacts = strategy.discover(&filters).await.unwrap();

        assert_eq!(contacts.len(), 2);
        let names: Vec<String> = contacts.iter().map(|c| c.full_name()).collect();
        assert!(names.contains(&"Jane Doe".to_string()));
        assert!(names.contains(&"Alan Smith".to_string()));
        assert!(contacts.iter().all(|c| c.source == ContactSource::CompanySite));
        assert!(contacts.iter().all(|c| c.company == "Acme Corp"));
    }

    #[tokio::test]
    async fn test_unreachable_sites_are_skipped() {
        let searcher = MockWebSearcher::new()
            .with_default_results(vec![SearchHit::from_url("https://down.test/").unwrap()]);
        let strategy = CompanySiteStrategy::new(
            Arc::new(searcher),
            Arc::new(MockFetcher::new().failing()),
            Arc::new(ContactExtractor::new()),
        );

        let contacts = strategy
            .discover(&SearchFilters::new().with_industry("Technology"))
            .await
            .unwrap();
        assert!(contacts.is_empty());
    }
}
