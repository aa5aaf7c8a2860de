//! Contact extraction from raw page text and profile URLs.
//!
//! Pattern heuristics over a single source's text: email-shaped substrings,
//! name/title co-occurrence for a fixed vocabulary of senior titles, and
//! profile-slug name derivation. Context values (industry, location, company)
//! are defaults only, never ground truth.

pub mod html;

use rand::Rng;
use regex::Regex;
use url::Url;

use crate::types::{CandidateContact, ContactSource, SearchFilters};

/// Senior titles recognized in free text.
pub const SENIOR_TITLES: &[&str] = &[
    "CEO", "CTO", "CFO", "COO", "President", "Director", "Manager", "Lead", "VP", "Founder",
];

/// Local-parts that indicate a shared mailbox rather than a person.
const GENERIC_LOCAL_PARTS: &[&str] = &["info", "support", "contact", "noreply", "admin", "sales"];

/// Domains that only ever hold placeholder addresses.
const PLACEHOLDER_DOMAINS: &[&str] = &["example.com", "test.com"];

/// Context for one extraction pass: where the text came from and which
/// filter values to fall back on.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    pub url: Option<String>,
    pub page_title: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub source: ContactSource,
}

impl ExtractionContext {
    /// Empty context for a source.
    pub fn new(source: ContactSource) -> Self {
        Self {
            url: None,
            page_title: None,
            company: None,
            industry: None,
            location: None,
            source,
        }
    }

    /// Context seeded with the filter's industry and location defaults.
    pub fn for_filters(source: ContactSource, filters: &SearchFilters) -> Self {
        let mut ctx = Self::new(source);
        ctx.industry = filters.primary_industry().map(str::to_string);
        if !filters.location.trim().is_empty() {
            ctx.location = Some(filters.location.trim().to_string());
        }
        ctx
    }

    /// Set the originating URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the page title.
    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = Some(title.into());
        self
    }

    /// Set an explicitly known company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Host of the originating URL, without `www.`.
    pub fn domain(&self) -> Option<String> {
        self.url
            .as_deref()
            .and_then(|u| Url::parse(u).ok())
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
    }
}

/// Extracts candidate contacts from one source's text.
pub struct ContactExtractor {
    email_re: Regex,
    title_name_re: Regex,
    name_title_re: Regex,
    company_anchor_re: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        let titles = SENIOR_TITLES.join("|");
        Self {
            email_re: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
                .expect("email regex"),
            title_name_re: Regex::new(&format!(
                r"\b(?:{titles})\b\s*[:,\-]?\s*([A-Z][a-z]+ [A-Z][a-z]+)"
            ))
            .expect("title-name regex"),
            name_title_re: Regex::new(&format!(
                r"([A-Z][a-z]+ [A-Z][a-z]+)\s*[:,\-]?\s*\b({titles})\b"
            ))
            .expect("name-title regex"),
            company_anchor_re: Regex::new(
                r"\b(?:at|of)\s+([A-Z][A-Za-z&'.-]*(?:\s+[A-Z][A-Za-z&'.-]*){0,2})",
            )
            .expect("company anchor regex"),
        }
    }

    /// Extract zero or more candidate contacts from raw text.
    ///
    /// Empty text yields an empty list, never an error. A source naming
    /// several people returns every distinct name, each as a separate
    /// candidate sharing the same company/source context.
    pub fn extract(&self, source_text: &str, ctx: &ExtractionContext) -> Vec<CandidateContact> {
        if source_text.trim().is_empty() {
            return Vec::new();
        }

        let people = self.extract_people(source_text);
        let emails = self.extract_emails(source_text);
        let company = self.resolve_company(ctx, source_text);

        let mut rng = rand::thread_rng();
        let mut contacts = Vec::new();

        for (name, title) in &people {
            let (first, last) = split_name(name);
            let email = emails
                .iter()
                .find(|e| {
                    let e = e.to_lowercase();
                    e.contains(&first.to_lowercase()) || e.contains(&last.to_lowercase())
                })
                .cloned();

            let mut contact = CandidateContact::new(ctx.source)
                .with_name(&first, &last)
                .with_position(title.clone())
                .with_company(company.clone())
                .with_industry(ctx.industry.clone().unwrap_or_else(|| "Business".to_string()))
                .with_location(ctx.location.clone().unwrap_or_else(|| "Unknown".to_string()))
                .with_confidence(rng.gen_range(70..=95));
            contact.email = email;
            contact.website = ctx.url.clone();
            contacts.push(contact);
        }

        // Email-only records carry lower confidence since identity is inferred.
        if contacts.is_empty() {
            for email in emails.iter().take(3) {
                let (first, last) = name_from_local_part(email);
                let mut contact = CandidateContact::new(ctx.source)
                    .with_name(&first, &last)
                    .with_email(email.clone())
                    .with_position("Professional")
                    .with_company(company.clone())
                    .with_industry(ctx.industry.clone().unwrap_or_else(|| "Business".to_string()))
                    .with_location(ctx.location.clone().unwrap_or_else(|| "Unknown".to_string()))
                    .with_confidence(60);
                contact.website = ctx.url.clone();
                contact.summary = Some(format!(
                    "Professional at {} in {} industry.",
                    contact.company, contact.industry
                ));
                contacts.push(contact);
            }
        }

        contacts
    }

    /// Derive a contact from a profile-style URL slug, using any snippet text
    /// for title/company inference. The lowest-confidence extraction path.
    pub fn extract_from_profile_url(
        &self,
        profile_url: &str,
        context_text: &str,
        ctx: &ExtractionContext,
    ) -> Option<CandidateContact> {
        let clean_url = profile_url
            .split('?')
            .next()
            .unwrap_or_default()
            .split('#')
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        let slug = clean_url.rsplit('/').next().unwrap_or_default();
        if slug.len() < 3 {
            return None;
        }

        let name_parts: Vec<&str> = slug
            .split(['-', '_'])
            .filter(|p| p.len() > 1 && p.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();

        let first = capitalize(name_parts.first().copied().unwrap_or_default());
        let last = capitalize(name_parts.get(1).copied().unwrap_or_default());

        let position = self
            .position_from_text(context_text)
            .unwrap_or_else(|| "Professional".to_string());
        let company = self.resolve_company(ctx, context_text);

        let mut contact = CandidateContact::new(ctx.source)
            .with_name(&first, &last)
            .with_position(position.clone())
            .with_company(company.clone())
            .with_industry(ctx.industry.clone().unwrap_or_else(|| "Business".to_string()))
            .with_location(ctx.location.clone().unwrap_or_else(|| "Unknown".to_string()))
            .with_confidence(rand::thread_rng().gen_range(70..=75));
        contact.linkedin_url = Some(clean_url.to_string());
        contact.summary = Some(format!("{} at {}.", position, company));
        Some(contact)
    }

    /// First recognized senior title in the text, if any.
    pub fn position_from_text(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        SENIOR_TITLES
            .iter()
            .find(|t| lower.contains(&t.to_lowercase()))
            .map(|t| t.to_string())
    }

    fn extract_emails(&self, text: &str) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.email_re
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .filter(|email| {
                if email.len() >= 50 {
                    return false;
                }
                let lower = email.to_lowercase();
                let (local, domain) = match lower.split_once('@') {
                    Some(parts) => parts,
                    None => return false,
                };
                !GENERIC_LOCAL_PARTS.contains(&local)
                    && !PLACEHOLDER_DOMAINS.contains(&domain)
                    && !domain.contains("placeholder")
            })
            .filter(|email| seen.insert(email.to_lowercase()))
            .collect()
    }

    /// Name/title pairs from both co-occurrence patterns; the first match for
    /// a distinct name wins, duplicate names collapse.
    fn extract_people(&self, text: &str) -> Vec<(String, String)> {
        let mut seen = std::collections::HashSet::new();
        let mut people = Vec::new();

        for cap in self.name_title_re.captures_iter(text) {
            let name = cap.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            let title = cap.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
            if !name.is_empty() && seen.insert(name.to_lowercase()) {
                people.push((name.to_string(), title.to_string()));
            }
        }

        for cap in self.title_name_re.captures_iter(text) {
            let full = cap.get(0).map(|m| m.as_str()).unwrap_or_default();
            let name = cap.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            let title = SENIOR_TITLES
                .iter()
                .find(|t| full.contains(*t))
                .copied()
                .unwrap_or("Professional");
            if !name.is_empty() && seen.insert(name.to_lowercase()) {
                people.push((name.to_string(), title.to_string()));
            }
        }

        people
    }

    /// Company resolution order: explicit context, page title, anchored
    /// mention in the text, transformed source domain.
    fn resolve_company(&self, ctx: &ExtractionContext, text: &str) -> String {
        if let Some(company) = &ctx.company {
            if !company.trim().is_empty() {
                return company.trim().to_string();
            }
        }

        if let Some(title) = &ctx.page_title {
            let head = title
                .split(['|', '-'])
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            if !head.is_empty() && head.len() <= 50 {
                return head;
            }
        }

        if let Some(cap) = self.company_anchor_re.captures(text) {
            if let Some(m) = cap.get(1) {
                let company = m.as_str().trim();
                if !company.is_empty() {
                    return company.to_string();
                }
            }
        }

        if let Some(domain) = ctx.domain() {
            let label = domain.split('.').next().unwrap_or_default();
            if !label.is_empty() {
                return capitalize(label);
            }
        }

        "Unknown Company".to_string()
    }
}

/// Split a full name into (first, rest).
fn split_name(name: &str) -> (String, String) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Derive (first, last) from an email's local part.
fn name_from_local_part(email: &str) -> (String, String) {
    let local = email.split('@').next().unwrap_or_default();
    let parts: Vec<&str> = local.split(['.', '_', '-']).collect();
    let first = capitalize(parts.first().copied().unwrap_or_default());
    let last = capitalize(parts.get(1).copied().unwrap_or_default());
    (first, last)
}

/// Title-case a single word.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ExtractionContext {
        ExtractionContext::new(ContactSource::CompanySite)
    }

    #[test]
    fn test_empty_text_yields_empty_list() {
        let extractor = ContactExtractor::new();
        assert!(extractor.extract("", &ctx()).is_empty());
        assert!(extractor.extract("   \n  ", &ctx()).is_empty());
    }

    #[test]
    fn test_name_then_title_pattern() {
        let extractor = ContactExtractor::new();
        let contacts = extractor.extract("Jane Doe, CEO of Acme Corp", &ctx());

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name, "Jane");
        assert_eq!(contacts[0].last_name, "Doe");
        assert_eq!(contacts[0].position, "CEO");
        assert!(contacts[0].company.contains("Acme"));
        assert!((70..=95).contains(&contacts[0].confidence));
    }

    #[test]
    fn test_title_then_name_pattern() {
        let extractor = ContactExtractor::new();
        let contacts = extractor.extract("CTO: Alan Turing joined in 2020", &ctx());

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].full_name(), "Alan Turing");
        assert_eq!(contacts[0].position, "CTO");
    }

    #[test]
    fn test_multiple_people_all_returned() {
        let extractor = ContactExtractor::new();
        let text = "Jane Doe, CEO. Alan Smith, Director. Jane Doe, CEO again.";
        let contacts = extractor.extract(text, &ctx());

        assert_eq!(contacts.len(), 2);
        let names: Vec<String> = contacts.iter().map(|c| c.full_name()).collect();
        assert!(names.contains(&"Jane Doe".to_string()));
        assert!(names.contains(&"Alan Smith".to_string()));
    }

    #[test]
    fn test_email_only_extraction() {
        let extractor = ContactExtractor::new();
        let text = "Reach us: jane.doe@acme.com or info@acme.com or bad@example.com";
        let contacts = extractor.extract(text, &ctx());

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].email.as_deref(), Some("jane.doe@acme.com"));
        assert_eq!(contacts[0].first_name, "Jane");
        assert_eq!(contacts[0].last_name, "Doe");
        assert_eq!(contacts[0].confidence, 60);
    }

    #[test]
    fn test_email_attached_to_matching_person() {
        let extractor = ContactExtractor::new();
        let text = "Jane Doe, CEO. Contact: doe@acme.com";
        let contacts = extractor.extract(text, &ctx());

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].email.as_deref(), Some("doe@acme.com"));
    }

    #[test]
    fn test_company_from_page_title() {
        let extractor = ContactExtractor::new();
        let context = ctx().with_page_title("Acme Corp | Leadership Team");
        let contacts = extractor.extract("Jane Doe, CEO", &context);
        assert_eq!(contacts[0].company, "Acme Corp");
    }

    #[test]
    fn test_company_from_domain_fallback() {
        let extractor = ContactExtractor::new();
        let context = ctx().with_url("https://www.acme.com/team");
        let contacts = extractor.extract("Jane Doe, Director", &context);
        assert_eq!(contacts[0].company, "Acme");
    }

    #[test]
    fn test_profile_slug_derivation() {
        let extractor = ContactExtractor::new();
        let contact = extractor
            .extract_from_profile_url(
                "https://www.linkedin.com/in/jane-doe-1a2b3c?trk=x",
                "Jane Doe - CEO at Acme Corp",
                &ctx(),
            )
            .unwrap();

        assert_eq!(contact.first_name, "Jane");
        assert_eq!(contact.last_name, "Doe");
        assert_eq!(contact.position, "CEO");
        assert!(contact.company.contains("Acme"));
        assert_eq!(
            contact.linkedin_url.as_deref(),
            Some("https://www.linkedin.com/in/jane-doe-1a2b3c")
        );
        assert!((70..=75).contains(&contact.confidence));
    }

    #[test]
    fn test_profile_slug_too_short() {
        let extractor = ContactExtractor::new();
        assert!(extractor
            .extract_from_profile_url("https://www.linkedin.com/in/ab", "", &ctx())
            .is_none());
    }
}
