//! Page fetcher implementations.

pub mod http;

pub use http::{HttpFetcher, BROWSER_ACCEPT, USER_AGENTS};
