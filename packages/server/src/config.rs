//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,

    /// Enables the synthetic generator and insight/outreach routes' AI paths.
    pub openai_api_key: Option<String>,

    /// Chat model override.
    pub openai_model: Option<String>,

    /// Per-fetch timeout for scraping strategies, seconds.
    pub fetch_timeout_secs: u64,

    /// Per-strategy wall-clock budget, seconds.
    pub strategy_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_model: env::var("OPENAI_MODEL").ok().filter(|m| !m.is_empty()),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .context("FETCH_TIMEOUT_SECS must be a valid number")?,
            strategy_timeout_secs: env::var("STRATEGY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("STRATEGY_TIMEOUT_SECS must be a valid number")?,
        })
    }
}
