//! Page fetcher trait and the fetched-page type.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use crate::error::FetchResult;
use crate::extract::html;

/// A fetched web page with its derived plain text.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested.
    pub url: String,

    /// The URL after redirects.
    pub final_url: String,

    /// Raw HTML body.
    pub html: String,

    /// Plain-text rendition of the body.
    pub text: String,

    /// Document title, if any.
    pub title: Option<String>,

    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Build a page from raw HTML, deriving text and title.
    pub fn new(url: impl Into<String>, html_body: impl Into<String>) -> Self {
        let url = url.into();
        let html_body = html_body.into();
        let text = html::html_to_text(&html_body);
        let title = html::extract_title(&html_body);
        Self {
            final_url: url.clone(),
            url,
            html: html_body,
            text,
            title,
            fetched_at: Utc::now(),
        }
    }

    /// Set the post-redirect URL.
    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        self.final_url = final_url.into();
        self
    }

    /// Host of the final URL, without a leading `www.`.
    pub fn domain(&self) -> Option<String> {
        Url::parse(&self.final_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
    }

    /// Anchors in the body, resolved against the final URL.
    pub fn links(&self) -> Vec<html::Link> {
        match Url::parse(&self.final_url) {
            Ok(base) => html::extract_links(&base, &self.html),
            Err(_) => Vec::new(),
        }
    }
}

/// Fetches single pages over the network.
///
/// Every fetch carries an explicit timeout; on timeout the implementation
/// reports that single fetch's failure, never aborting a whole pipeline run.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page by URL.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;
}
