//! Web searcher trait for external discovery.
//!
//! Strategies query the open web through this trait rather than owning an
//! HTTP client themselves, which keeps search providers swappable and lets
//! tests inject canned results.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::fetchers::{BROWSER_ACCEPT, USER_AGENTS};

/// A discovered URL from web search with metadata.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The discovered URL.
    pub url: Url,

    /// Title of the result (if provided by the engine).
    pub title: Option<String>,

    /// Snippet/description from the result listing.
    pub snippet: Option<String>,
}

impl SearchHit {
    /// Create a new hit from a URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            title: None,
            snippet: None,
        }
    }

    /// Create from a URL string.
    pub fn from_url(url: &str) -> Option<Self> {
        Url::parse(url).ok().map(Self::new)
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Title and snippet concatenated, for text-pattern extraction.
    pub fn context_text(&self) -> String {
        let mut text = String::new();
        if let Some(title) = &self.title {
            text.push_str(title);
            text.push(' ');
        }
        if let Some(snippet) = &self.snippet {
            text.push_str(snippet);
        }
        text
    }
}

/// General web search for open-world discovery.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web, returning up to `limit` hits.
    async fn search(&self, query: &str, limit: usize) -> FetchResult<Vec<SearchHit>>;
}

/// DuckDuckGo HTML-endpoint searcher.
///
/// Uses the no-JavaScript HTML results page, which tolerates anonymous
/// access better than the large engines. Result links are redirect URLs
/// carrying the target in a `uddg` query parameter.
pub struct DuckDuckGoSearcher {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for DuckDuckGoSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DuckDuckGoSearcher {
    /// Create a searcher with a 15 second request timeout.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: "https://duckduckgo.com/html/".to_string(),
        }
    }

    /// Override the endpoint (for tests against a local server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Resolve a result href: decode `uddg` redirects, fix scheme-relative URLs.
    fn resolve_result_url(&self, href: &str) -> Option<Url> {
        let absolute = if href.starts_with("//") {
            format!("https:{}", href)
        } else if href.starts_with('/') {
            format!("https://duckduckgo.com{}", href)
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&absolute).ok()?;

        if parsed.query().map(|q| q.contains("uddg=")).unwrap_or(false) {
            let target = parsed
                .query_pairs()
                .find(|(k, _)| k == "uddg")
                .map(|(_, v)| v.into_owned())?;
            return Url::parse(&target).ok();
        }

        Some(parsed)
    }

    fn parse_results(&self, html: &str, limit: usize) -> Vec<SearchHit> {
        let link_re = regex::Regex::new(
            r#"(?is)<a[^>]*class="[^"]*result__a[^"]*"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#,
        )
        .unwrap();
        let snippet_re = regex::Regex::new(
            r#"(?is)<a[^>]*class="[^"]*result__snippet[^"]*"[^>]*>(.*?)</a>"#,
        )
        .unwrap();

        let snippets: Vec<String> = snippet_re
            .captures_iter(html)
            .filter_map(|cap| cap.get(1))
            .map(|m| crate::extract::html::html_to_text(m.as_str()))
            .collect();

        let mut hits = Vec::new();
        for (i, cap) in link_re.captures_iter(html).enumerate() {
            if hits.len() >= limit {
                break;
            }
            let href = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
            let Some(url) = self.resolve_result_url(href) else {
                continue;
            };
            let title = cap
                .get(2)
                .map(|m| crate::extract::html::html_to_text(m.as_str()))
                .filter(|t| !t.is_empty());

            let mut hit = SearchHit::new(url);
            if let Some(title) = title {
                hit = hit.with_title(title);
            }
            if let Some(snippet) = snippets.get(i) {
                hit = hit.with_snippet(snippet.clone());
            }
            hits.push(hit);
        }

        hits
    }
}

#[async_trait]
impl WebSearcher for DuckDuckGoSearcher {
    async fn search(&self, query: &str, limit: usize) -> FetchResult<Vec<SearchHit>> {
        tracing::debug!(query = %query, "web search starting");

        let user_agent = USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .header("User-Agent", user_agent)
            .header("Accept", BROWSER_ACCEPT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: self.endpoint.clone(),
                    }
                } else {
                    FetchError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let hits = self.parse_results(&html, limit);
        tracing::debug!(query = %query, hits = hits.len(), "web search completed");
        Ok(hits)
    }
}

/// Mock web searcher for testing.
///
/// Returns canned hits per query, with optional defaults for any query, and
/// records every query for assertions.
#[derive(Default)]
pub struct MockWebSearcher {
    results: RwLock<HashMap<String, Vec<SearchHit>>>,
    default_results: RwLock<Vec<SearchHit>>,
    queries: RwLock<Vec<String>>,
}

impl MockWebSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results for an exact query.
    pub fn with_results(self, query: &str, results: Vec<SearchHit>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Add URL strings as results for an exact query.
    pub fn with_urls(self, query: &str, urls: &[&str]) -> Self {
        let results: Vec<_> = urls.iter().filter_map(|u| SearchHit::from_url(u)).collect();
        self.with_results(query, results)
    }

    /// Results returned for any query without an exact match.
    pub fn with_default_results(self, results: Vec<SearchHit>) -> Self {
        *self.default_results.write().unwrap() = results;
        self
    }

    /// All queries issued so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str, limit: usize) -> FetchResult<Vec<SearchHit>> {
        self.queries.write().unwrap().push(query.to_string());

        let mut hits = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default_results.read().unwrap().clone());
        hits.truncate(limit);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uddg_redirect() {
        let searcher = DuckDuckGoSearcher::new();
        let url = searcher
            .resolve_result_url("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fteam&rut=abc")
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/team");
    }

    #[test]
    fn test_resolve_plain_url() {
        let searcher = DuckDuckGoSearcher::new();
        let url = searcher.resolve_result_url("https://example.com/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_parse_results() {
        let searcher = DuckDuckGoSearcher::new();
        let html = r#"
            <a class="result__a" href="https://example.com/one">First Result</a>
            <a class="result__snippet" href="/l/one">CEO Jane Doe leads the team</a>
            <a class="result__a" href="https://example.com/two">Second Result</a>
        "#;

        let hits = searcher.parse_results(html, 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title.as_deref(), Some("First Result"));
        assert!(hits[0].context_text().contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_mock_searcher_records_queries() {
        let searcher = MockWebSearcher::new().with_urls(
            "ceo austin",
            &["https://www.linkedin.com/in/jane-doe", "https://example.com"],
        );

        let hits = searcher.search("ceo austin", 10).await.unwrap();
        assert_eq!(hits.len(), 2);

        let empty = searcher.search("unmatched", 10).await.unwrap();
        assert!(empty.is_empty());

        assert_eq!(searcher.queries(), vec!["ceo austin", "unmatched"]);
    }
}
