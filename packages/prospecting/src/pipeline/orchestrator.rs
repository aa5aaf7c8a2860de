//! Discovery orchestrator: the single-pass state machine per request.
//!
//! Strategies run sequentially in priority order and later ones are only
//! attempted when earlier ones fail or come back empty. This is a cost
//! control, not an oversight; do not parallelize it away.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::email::{derive_domain, EmailChecker};
use crate::pipeline::dedup::dedup_contacts;
use crate::pipeline::score::composite_score;
use crate::pipeline::synthetic::SyntheticGenerator;
use crate::traits::ai::ProspectAI;
use crate::traits::strategy::SourceStrategy;
use crate::types::{
    CandidateContact, DiscoveryResult, EmailValidation, ScoredProspect, SearchFilters,
};

/// Orchestrator tuning knobs.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Wall-clock budget per strategy attempt; timeout counts as zero yield.
    pub strategy_timeout: Duration,

    /// How many generated alternates to try when upgrading an invalid email.
    pub upgrade_attempts: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            strategy_timeout: Duration::from_secs(60),
            upgrade_attempts: 3,
        }
    }
}

/// Runs the discover → dedup → validate → score → rank → fallback pipeline.
///
/// Owns all post-creation mutation of candidate contacts and the transition
/// to scored prospects. `discover` never fails: the three-tier fallback
/// (real → synthetic → static) always terminates in a result.
pub struct DiscoveryOrchestrator {
    strategies: Vec<Arc<dyn SourceStrategy>>,
    checker: Arc<EmailChecker>,
    synthetic: SyntheticGenerator,
    config: OrchestratorConfig,
}

impl DiscoveryOrchestrator {
    /// Create an orchestrator over the given strategies, in priority order.
    pub fn new(strategies: Vec<Arc<dyn SourceStrategy>>, checker: Arc<EmailChecker>) -> Self {
        Self {
            strategies,
            checker,
            synthetic: SyntheticGenerator::new(None),
            config: OrchestratorConfig::default(),
        }
    }

    /// Back the synthetic fallback tier with a text-generation service.
    pub fn with_synthetic_ai(mut self, ai: Arc<dyn ProspectAI>) -> Self {
        self.synthetic = SyntheticGenerator::new(Some(ai));
        self
    }

    /// Override tuning knobs.
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one discovery request end to end.
    pub async fn discover(&self, filters: &SearchFilters) -> DiscoveryResult {
        let limit = filters.clamped_limit();
        info!(limit, "prospect discovery starting");

        let (raw, mut source, generated) = self.acquire(filters, limit).await;

        let deduped = dedup_contacts(raw);
        debug!(candidates = deduped.len(), "deduplicated candidate pool");

        let mut prospects = Vec::with_capacity(deduped.len());
        for mut contact in deduped {
            let validation = self.validate_and_upgrade(&mut contact).await;
            let score = composite_score(&contact, validation.as_ref());
            let validated = validation.as_ref().map(|v| v.is_valid).unwrap_or(false);

            let mut tags = Vec::new();
            if !contact.source.is_generated() {
                tags.push("Real Contact".to_string());
            }
            tags.push(contact.source.label().to_string());

            prospects.push(ScoredProspect {
                contact,
                email_validation: validation,
                score,
                tags,
                validated,
            });
        }

        // Stable sort: ties keep insertion order.
        prospects.sort_by(|a, b| b.score.cmp(&a.score));
        prospects.truncate(limit);

        if let Some(first) = prospects.first() {
            source.get_or_insert(first.contact.source);
        }

        info!(
            prospects = prospects.len(),
            generated,
            source = source.map(|s| s.as_str()).unwrap_or("none"),
            "prospect discovery completed"
        );

        DiscoveryResult {
            prospects,
            generated,
            source,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Step 1 + step 6: try strategies in order, fall back when all are dry.
    async fn acquire(
        &self,
        filters: &SearchFilters,
        limit: usize,
    ) -> (
        Vec<CandidateContact>,
        Option<crate::types::ContactSource>,
        bool,
    ) {
        for strategy in &self.strategies {
            let attempt =
                tokio::time::timeout(self.config.strategy_timeout, strategy.discover(filters))
                    .await;

            match attempt {
                Ok(Ok(contacts)) if !contacts.is_empty() => {
                    info!(
                        strategy = strategy.name(),
                        candidates = contacts.len(),
                        "strategy yielded candidates"
                    );
                    return (contacts, Some(strategy.source()), false);
                }
                Ok(Ok(_)) => {
                    debug!(strategy = strategy.name(), "strategy yielded nothing");
                }
                Ok(Err(e)) => {
                    warn!(strategy = strategy.name(), error = %e, "strategy failed");
                }
                Err(_) => {
                    warn!(
                        strategy = strategy.name(),
                        timeout_secs = self.config.strategy_timeout.as_secs(),
                        "strategy timed out"
                    );
                }
            }
        }

        let (contacts, tier) = self.synthetic.generate(filters, limit).await;
        (contacts, Some(tier), true)
    }

    /// Step 3: validate the candidate's email, generating and trying ranked
    /// alternates when the current one is missing or invalid.
    async fn validate_and_upgrade(
        &self,
        contact: &mut CandidateContact,
    ) -> Option<EmailValidation> {
        if contact.email.is_none() && contact.alternate_emails.is_empty() {
            let domain_hint = contact
                .website
                .as_deref()
                .and_then(|w| url::Url::parse(w).ok())
                .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
                .and_then(|d| derive_domain(&d))
                .or_else(|| derive_domain(&contact.company));

            if let Some(domain) = domain_hint {
                let ranked =
                    self.checker
                        .rank_candidates(&contact.first_name, &contact.last_name, &domain);
                if let Some(top) = ranked.first() {
                    contact.email = Some(top.email.clone());
                }
                contact.alternate_emails =
                    ranked.into_iter().skip(1).map(|r| r.email).collect();
            }
        }

        let email = contact.email.clone()?;
        let mut best = self.checker.validate(&email).await;

        if !best.is_valid {
            let alternates: Vec<String> = contact
                .alternate_emails
                .iter()
                .take(self.config.upgrade_attempts)
                .cloned()
                .collect();

            for alternate in alternates {
                let verdict = self.checker.validate(&alternate).await;
                if verdict.is_valid && verdict.confidence > best.confidence {
                    debug!(email = %alternate, "adopted upgraded email candidate");
                    contact.email = Some(alternate);
                    best = verdict;
                    break;
                }
            }
        }

        Some(best)
    }
}
