//! Candidate contacts and scored prospects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder first name used when a name cannot be extracted.
pub const PLACEHOLDER_FIRST_NAME: &str = "John";

/// Placeholder last name used when a name cannot be extracted.
pub const PLACEHOLDER_LAST_NAME: &str = "Doe";

/// Which acquisition channel produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactSource {
    /// Business-directory lookup
    Directory,
    /// Professional-network search via a general web search engine
    WebSearch,
    /// Direct company-site crawling
    CompanySite,
    /// LLM-generated fallback
    Synthetic,
    /// Built-in example records, the floor of the fallback chain
    StaticFallback,
}

impl ContactSource {
    /// Wire/tag name for this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::WebSearch => "web-search",
            Self::CompanySite => "company-site",
            Self::Synthetic => "synthetic",
            Self::StaticFallback => "static-fallback",
        }
    }

    /// Human-readable label used in prospect tags.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Directory => "Business Directory",
            Self::WebSearch => "Web Search",
            Self::CompanySite => "Company Website",
            Self::Synthetic => "AI Generated",
            Self::StaticFallback => "Demo Data",
        }
    }

    /// Whether records from this source are fabricated rather than observed.
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Synthetic | Self::StaticFallback)
    }
}

impl std::fmt::Display for ContactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prospect before validation and scoring.
///
/// Created by a source strategy and never mutated by it after return; the
/// orchestrator owns all post-creation mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateContact {
    /// Unique id, created at discovery time, never reused.
    pub id: Uuid,

    pub first_name: String,
    pub last_name: String,

    /// Observed or inferred email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Ranked generated email candidates, best first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_emails: Vec<String>,

    pub company: String,
    pub position: String,
    pub industry: String,
    pub location: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Which strategy produced this record.
    pub source: ContactSource,

    /// Strategy-assigned trust in the extraction, 0-100. An ordering signal,
    /// not a calibrated probability.
    pub confidence: u8,
}

impl CandidateContact {
    /// Create a contact with placeholder names and empty fields.
    pub fn new(source: ContactSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: PLACEHOLDER_FIRST_NAME.to_string(),
            last_name: PLACEHOLDER_LAST_NAME.to_string(),
            email: None,
            alternate_emails: Vec::new(),
            company: String::new(),
            position: String::new(),
            industry: String::new(),
            location: String::new(),
            linkedin_url: None,
            website: None,
            phone: None,
            summary: None,
            source,
            confidence: 50,
        }
    }

    /// Set the name, falling back to placeholders for empty parts.
    pub fn with_name(mut self, first: &str, last: &str) -> Self {
        if !first.trim().is_empty() {
            self.first_name = first.trim().to_string();
        }
        if !last.trim().is_empty() {
            self.last_name = last.trim().to_string();
        }
        self
    }

    /// Set the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Set the position.
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Set the industry.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the confidence.
    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = confidence.min(100);
        self
    }

    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the name is still the unextractable-placeholder pair.
    pub fn has_placeholder_name(&self) -> bool {
        self.first_name == PLACEHOLDER_FIRST_NAME && self.last_name == PLACEHOLDER_LAST_NAME
    }

    /// Deduplication key: normalized email when present, else the normalized
    /// (first, last, company) triple.
    pub fn dedup_key(&self) -> String {
        match &self.email {
            Some(email) if !email.trim().is_empty() => email.trim().to_lowercase(),
            _ => format!(
                "{}|{}|{}",
                self.first_name.trim().to_lowercase(),
                self.last_name.trim().to_lowercase(),
                self.company.trim().to_lowercase()
            ),
        }
    }
}

/// Verdict from the email plausibility checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailValidation {
    pub is_valid: bool,
    pub reason: String,
    pub confidence: u8,
}

impl EmailValidation {
    /// Format check failed (or input was empty).
    pub fn invalid_format() -> Self {
        Self {
            is_valid: false,
            reason: "invalid format".to_string(),
            confidence: 0,
        }
    }

    /// Format passed but the domain resolves no mail-exchange record.
    pub fn no_mail_record() -> Self {
        Self {
            is_valid: false,
            reason: "domain has no mail record".to_string(),
            confidence: 25,
        }
    }

    /// Both format and domain checks passed.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reason: "valid".to_string(),
            confidence: 75,
        }
    }
}

/// A candidate contact after validation and composite scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProspect {
    #[serde(flatten)]
    pub contact: CandidateContact,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_validation: Option<EmailValidation>,

    /// Composite rank, clamped to [20, 100].
    pub score: u8,

    /// Free-form labels, e.g. "Real Contact", "AI Generated".
    pub tags: Vec<String>,

    /// Whether the email/identity passed the checker.
    pub validated: bool,
}

/// Result of one discovery request, before the caller persists anything.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResult {
    pub prospects: Vec<ScoredProspect>,

    /// True iff the fallback chain (synthetic or static) supplied the records.
    pub generated: bool,

    /// Which source ultimately produced the result set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ContactSource>,

    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_key_prefers_email() {
        let contact = CandidateContact::new(ContactSource::WebSearch)
            .with_name("Jane", "Doe")
            .with_company("Acme")
            .with_email("Jane.Doe@Acme.com");
        assert_eq!(contact.dedup_key(), "jane.doe@acme.com");
    }

    #[test]
    fn test_dedup_key_falls_back_to_triple() {
        let contact = CandidateContact::new(ContactSource::Directory)
            .with_name("Jane", "Doe")
            .with_company("Acme Corp");
        assert_eq!(contact.dedup_key(), "jane|doe|acme corp");
    }

    #[test]
    fn test_placeholder_names_never_empty() {
        let contact = CandidateContact::new(ContactSource::CompanySite).with_name("  ", "");
        assert_eq!(contact.first_name, PLACEHOLDER_FIRST_NAME);
        assert_eq!(contact.last_name, PLACEHOLDER_LAST_NAME);
        assert!(contact.has_placeholder_name());
    }

    #[test]
    fn test_source_serialization() {
        let json = serde_json::to_string(&ContactSource::WebSearch).unwrap();
        assert_eq!(json, "\"web-search\"");
        assert!(ContactSource::Synthetic.is_generated());
        assert!(!ContactSource::Directory.is_generated());
    }

    #[test]
    fn test_scored_prospect_flattens_contact() {
        let prospect = ScoredProspect {
            contact: CandidateContact::new(ContactSource::Synthetic).with_name("Jane", "Doe"),
            email_validation: None,
            score: 70,
            tags: vec!["AI Generated".to_string()],
            validated: false,
        };
        let value = serde_json::to_value(&prospect).unwrap();
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["score"], 70);
    }
}
