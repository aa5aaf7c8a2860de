//! Email plausibility checking: format, mail-exchange reachability, and
//! candidate ranking.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::email::patterns::{
    derive_domain, domain_matches_company, generate_local_parts, RankedEmail, FREE_MAIL_DOMAINS,
};
use crate::types::EmailValidation;

/// How long a per-domain reachability verdict stays fresh.
pub const MX_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// DNS batch size for `validate_batch`.
const BATCH_SIZE: usize = 10;

/// Pause between validation batches.
const BATCH_PAUSE: Duration = Duration::from_millis(1000);

/// Resolves whether a domain accepts mail.
///
/// Lookup failures are reported as unreachable: a transient DNS glitch is
/// indistinguishable from an invalid domain here, which is an accepted
/// approximation.
#[async_trait]
pub trait MxResolver: Send + Sync {
    /// True iff the domain resolves at least one mail-exchange record.
    async fn has_mx_record(&self, domain: &str) -> bool;
}

/// System-DNS-backed resolver.
pub struct DnsMxResolver {
    resolver: TokioAsyncResolver,
}

impl Default for DnsMxResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsMxResolver {
    /// Create a resolver with default upstream configuration.
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
        }
    }
}

#[async_trait]
impl MxResolver for DnsMxResolver {
    async fn has_mx_record(&self, domain: &str) -> bool {
        match self.resolver.mx_lookup(domain).await {
            Ok(lookup) => lookup.iter().next().is_some(),
            Err(e) => {
                debug!(domain = %domain, error = %e, "MX lookup failed");
                false
            }
        }
    }
}

struct CachedVerdict {
    reachable: bool,
    checked_at: Instant,
}

/// Email plausibility checker.
///
/// The per-domain reachability cache is safe for concurrent read/update with
/// last-write-wins semantics; staleness within the TTL window is tolerated.
/// Growth is unbounded in memory, acceptable since keys are domains rather
/// than emails.
pub struct EmailChecker {
    resolver: Arc<dyn MxResolver>,
    cache: RwLock<HashMap<String, CachedVerdict>>,
    cache_ttl: Duration,
    email_re: Regex,
}

impl EmailChecker {
    /// Create a checker using the given resolver.
    pub fn new(resolver: Arc<dyn MxResolver>) -> Self {
        Self {
            resolver,
            cache: RwLock::new(HashMap::new()),
            cache_ttl: MX_CACHE_TTL,
            email_re: Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
                .expect("email regex"),
        }
    }

    /// Override the cache TTL (mainly for tests).
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// RFC-lite syntax check. Fails closed on empty input.
    pub fn check_format(&self, email: &str) -> bool {
        !email.trim().is_empty() && self.email_re.is_match(email.trim())
    }

    /// Whether the domain resolves a mail-exchange record, cached per domain.
    pub async fn check_domain_reachable(&self, domain: &str) -> bool {
        let domain = domain.trim().to_lowercase();

        if let Some(cached) = self.cache.read().unwrap().get(&domain) {
            if cached.checked_at.elapsed() < self.cache_ttl {
                return cached.reachable;
            }
        }

        let reachable = self.resolver.has_mx_record(&domain).await;

        self.cache.write().unwrap().insert(
            domain,
            CachedVerdict {
                reachable,
                checked_at: Instant::now(),
            },
        );

        reachable
    }

    /// Full validation: format plus domain reachability.
    pub async fn validate(&self, email: &str) -> EmailValidation {
        if !self.check_format(email) {
            return EmailValidation::invalid_format();
        }

        let domain = match email.trim().split('@').nth(1) {
            Some(d) if !d.is_empty() => d,
            _ => return EmailValidation::invalid_format(),
        };

        if self.check_domain_reachable(domain).await {
            EmailValidation::valid()
        } else {
            EmailValidation::no_mail_record()
        }
    }

    /// Validate a slice of emails in batches, pausing between batches to
    /// bound DNS pressure. Never errors; individual failures come back as
    /// zero-confidence verdicts.
    pub async fn validate_batch(&self, emails: &[String]) -> Vec<EmailValidation> {
        let mut results = Vec::with_capacity(emails.len());

        for (i, chunk) in emails.chunks(BATCH_SIZE).enumerate() {
            if i > 0 {
                tokio::time::sleep(BATCH_PAUSE).await;
            }
            for email in chunk {
                results.push(self.validate(email).await);
            }
        }

        results
    }

    /// Heuristic plausibility score for a candidate email, 0-100.
    ///
    /// Rewards name fragments in the local-part and known templates,
    /// penalizes public free-mail domains for business contacts.
    pub fn score_pattern(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        company: Option<&str>,
    ) -> u8 {
        let email = email.trim().to_lowercase();
        let first = first_name.trim().to_lowercase();
        let last = last_name.trim().to_lowercase();

        if email.is_empty() || first.is_empty() || last.is_empty() {
            return 0;
        }

        let Some(domain) = email.split('@').nth(1) else {
            return 0;
        };

        let mut score: i32 = 0;

        if email.contains(&first) {
            score += 30;
        }
        if email.contains(&last) {
            score += 30;
        }

        if email == format!("{}.{}@{}", first, last, domain) {
            score += 25;
        } else if email == format!("{}@{}", first, domain)
            || email == format!("{}{}@{}", first, last, domain)
        {
            score += 20;
        }

        if let Some(company) = company {
            if domain_matches_company(domain, company) {
                score += 15;
            }
        }

        if FREE_MAIL_DOMAINS.contains(&domain) {
            score -= 10;
        }

        score.clamp(0, 100) as u8
    }

    /// Generate and rank the standard email permutations for a person,
    /// best-scoring first. Used whenever no observed email exists.
    ///
    /// `company_or_domain` may be a company name ("Acme Corp") or an actual
    /// domain ("acme.com"). Returns an empty list when no domain can be
    /// derived or either name part is unusable.
    pub fn rank_candidates(
        &self,
        first_name: &str,
        last_name: &str,
        company_or_domain: &str,
    ) -> Vec<RankedEmail> {
        let Some(domain) = derive_domain(company_or_domain) else {
            return Vec::new();
        };

        let mut ranked: Vec<RankedEmail> = generate_local_parts(first_name, last_name)
            .into_iter()
            .map(|(local, pattern)| {
                let email = format!("{}@{}", local, domain);
                let score = self.score_pattern(&email, first_name, last_name, Some(company_or_domain));
                RankedEmail {
                    email,
                    score,
                    pattern,
                }
            })
            .collect();

        // Stable sort: ties keep the permutation-set order.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockMxResolver;

    fn checker_with(resolver: MockMxResolver) -> EmailChecker {
        EmailChecker::new(Arc::new(resolver))
    }

    #[test]
    fn test_check_format() {
        let checker = checker_with(MockMxResolver::new());
        assert!(!checker.check_format("not-an-email"));
        assert!(checker.check_format("a@b.co"));
        assert!(!checker.check_format(""));
        assert!(!checker.check_format("a@b"));
        assert!(!checker.check_format("a@b.c"));
        assert!(checker.check_format("jane.doe+crm@acme-corp.io"));
    }

    #[tokio::test]
    async fn test_validate_verdicts() {
        let checker = checker_with(MockMxResolver::new().with_domain("acme.com"));

        let bad = checker.validate("not-an-email").await;
        assert!(!bad.is_valid);
        assert_eq!(bad.reason, "invalid format");
        assert_eq!(bad.confidence, 0);

        let unreachable = checker.validate("jane@nowhere.example").await;
        assert!(!unreachable.is_valid);
        assert_eq!(unreachable.reason, "domain has no mail record");
        assert_eq!(unreachable.confidence, 25);

        let good = checker.validate("jane@acme.com").await;
        assert!(good.is_valid);
        assert_eq!(good.reason, "valid");
        assert_eq!(good.confidence, 75);
    }

    #[tokio::test]
    async fn test_mx_cache_bounds_lookups() {
        let resolver = MockMxResolver::new().with_domain("acme.com");
        let lookups = resolver.lookup_count_handle();
        let checker = checker_with(resolver);

        checker.validate("jane@acme.com").await;
        checker.validate("john@acme.com").await;
        assert_eq!(lookups.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mx_cache_expiry() {
        let resolver = MockMxResolver::new().with_domain("acme.com");
        let lookups = resolver.lookup_count_handle();
        let checker = checker_with(resolver).with_cache_ttl(Duration::ZERO);

        checker.validate("jane@acme.com").await;
        checker.validate("jane@acme.com").await;
        assert_eq!(lookups.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn test_rank_candidates_determinism() {
        let checker = checker_with(MockMxResolver::new());

        let ranked = checker.rank_candidates("Jane", "Doe", "acme.com");
        assert!(!ranked.is_empty());
        assert_eq!(ranked[0].email, "jane.doe@acme.com");
        assert_eq!(ranked[0].pattern, "first.last");

        // Top choice beats every single-token variant.
        let single_token = ranked
            .iter()
            .find(|r| r.pattern == "first" || r.pattern == "last")
            .unwrap();
        assert!(ranked[0].score >= single_token.score);
    }

    #[test]
    fn test_rank_candidates_from_company_name() {
        let checker = checker_with(MockMxResolver::new());
        let ranked = checker.rank_candidates("Jane", "Doe", "Acme Corp");
        assert_eq!(ranked[0].email, "jane.doe@acme.com");
    }

    #[test]
    fn test_rank_candidates_empty_inputs() {
        let checker = checker_with(MockMxResolver::new());
        assert!(checker.rank_candidates("", "Doe", "acme.com").is_empty());
        assert!(checker.rank_candidates("Jane", "Doe", "").is_empty());
    }

    #[test]
    fn test_free_mail_penalty() {
        let checker = checker_with(MockMxResolver::new());
        let business = checker.score_pattern("jane.doe@acme.com", "Jane", "Doe", None);
        let free_mail = checker.score_pattern("jane.doe@gmail.com", "Jane", "Doe", None);
        assert!(business > free_mail);
    }

    #[tokio::test]
    async fn test_validate_batch_degrades_per_email() {
        let checker = checker_with(MockMxResolver::new().with_domain("acme.com"));
        let emails = vec![
            "jane@acme.com".to_string(),
            "broken".to_string(),
            "john@nowhere.example".to_string(),
        ];

        let verdicts = checker.validate_batch(&emails).await;
        assert_eq!(verdicts.len(), 3);
        assert!(verdicts[0].is_valid);
        assert_eq!(verdicts[1].confidence, 0);
        assert_eq!(verdicts[2].confidence, 25);
    }
}
