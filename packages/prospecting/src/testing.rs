//! Testing utilities including mock implementations.
//!
//! Useful for testing applications that use this library without making real
//! DNS, network, or LLM calls. Every mock tracks its calls so tests can
//! assert on invocation counts (e.g. the strategy short-circuit property).

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::email::checker::{EmailChecker, MxResolver};
use crate::error::{AiError, AiResult, FetchError, FetchResult, Result};
use crate::traits::ai::ProspectAI;
use crate::traits::fetcher::{FetchedPage, PageFetcher};
use crate::traits::strategy::SourceStrategy;
use crate::types::{
    CandidateContact, ContactSource, InsightBundle, OutreachRequest, SearchFilters,
};

pub use crate::traits::searcher::MockWebSearcher;

/// Mock MX resolver with a configurable set of reachable domains.
#[derive(Default)]
pub struct MockMxResolver {
    reachable: RwLock<HashSet<String>>,
    lookups: Arc<AtomicUsize>,
}

impl MockMxResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a domain as having a mail-exchange record.
    pub fn with_domain(self, domain: &str) -> Self {
        self.reachable.write().unwrap().insert(domain.to_lowercase());
        self
    }

    /// Shared handle to the lookup counter.
    pub fn lookup_count_handle(&self) -> Arc<AtomicUsize> {
        self.lookups.clone()
    }
}

#[async_trait]
impl MxResolver for MockMxResolver {
    async fn has_mx_record(&self, domain: &str) -> bool {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.reachable.read().unwrap().contains(&domain.to_lowercase())
    }
}

/// An `EmailChecker` over a fresh mock resolver (no reachable domains).
pub fn mock_checker() -> Arc<EmailChecker> {
    mock_checker_with(MockMxResolver::new())
}

/// An `EmailChecker` over the given mock resolver.
pub fn mock_checker_with(resolver: MockMxResolver) -> Arc<EmailChecker> {
    Arc::new(EmailChecker::new(Arc::new(resolver)))
}

/// Mock page fetcher returning canned HTML per URL.
#[derive(Default)]
pub struct MockFetcher {
    pages: RwLock<HashMap<String, String>>,
    fail_all: bool,
    fetches: RwLock<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned page.
    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.to_string(), html.to_string());
        self
    }

    /// Make every fetch fail.
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// All URLs fetched so far.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetches.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.fetches.write().unwrap().push(url.to_string());

        if self.fail_all {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            });
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .map(|html| FetchedPage::new(url, html.clone()))
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Mock AI with canned responses and per-method failure switches.
#[derive(Default)]
pub struct MockProspectAI {
    prospects: RwLock<Vec<CandidateContact>>,
    insights: RwLock<Option<InsightBundle>>,
    message: RwLock<Option<String>>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockProspectAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned prospects for `generate_prospects`.
    pub fn with_prospects(self, prospects: Vec<CandidateContact>) -> Self {
        *self.prospects.write().unwrap() = prospects;
        self
    }

    /// Canned insight bundle.
    pub fn with_insights(self, bundle: InsightBundle) -> Self {
        *self.insights.write().unwrap() = Some(bundle);
        self
    }

    /// Canned outreach message content.
    pub fn with_message(self, content: &str) -> Self {
        *self.message.write().unwrap() = Some(content.to_string());
        self
    }

    /// Make every call fail, as an unavailable service would.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Shared handle to the call counter.
    pub fn call_count_handle(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    fn check_failure(&self) -> AiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(AiError::Api("mock AI failure".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProspectAI for MockProspectAI {
    async fn generate_prospects(
        &self,
        _filters: &SearchFilters,
        count: usize,
    ) -> AiResult<Vec<CandidateContact>> {
        self.check_failure()?;
        let mut prospects = self.prospects.read().unwrap().clone();
        prospects.truncate(count.max(1));
        Ok(prospects)
    }

    async fn generate_insights(&self, _contact: &CandidateContact) -> AiResult<InsightBundle> {
        self.check_failure()?;
        self.insights
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| AiError::Parse("no canned insights".into()))
    }

    async fn generate_message(
        &self,
        _contact: &CandidateContact,
        _request: &OutreachRequest,
    ) -> AiResult<String> {
        self.check_failure()?;
        self.message
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| AiError::Parse("no canned message".into()))
    }

    async fn score_batch(&self, contacts: &[CandidateContact]) -> AiResult<Vec<u8>> {
        self.check_failure()?;
        Ok(vec![75; contacts.len()])
    }
}

/// Mock source strategy with canned results and a call counter.
pub struct MockStrategy {
    name: &'static str,
    source: ContactSource,
    results: Vec<CandidateContact>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockStrategy {
    pub fn new(name: &'static str, source: ContactSource) -> Self {
        Self {
            name,
            source,
            results: Vec::new(),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Canned discovery results.
    pub fn with_results(mut self, results: Vec<CandidateContact>) -> Self {
        self.results = results;
        self
    }

    /// Make discovery fail, as a blocked scraper would.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Shared handle to the call counter.
    pub fn call_count_handle(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl SourceStrategy for MockStrategy {
    async fn discover(&self, _filters: &SearchFilters) -> Result<Vec<CandidateContact>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(crate::error::DiscoveryError::Fetch(FetchError::Status {
                url: "https://mock.invalid".to_string(),
                status: 429,
            }));
        }
        Ok(self.results.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn source(&self) -> ContactSource {
        self.source
    }
}
