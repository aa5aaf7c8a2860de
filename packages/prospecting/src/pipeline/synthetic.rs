//! Synthetic prospect generation: the fallback chain's lower tiers.
//!
//! Tier 2 asks the text-generation service for plausible but fictitious
//! records; tier 3 is a small fixed set of built-in examples. Output from
//! either tier is always tagged by source, never mixed silently with
//! real-candidate records.

use std::sync::Arc;

use tracing::warn;

use crate::traits::ai::ProspectAI;
use crate::types::{CandidateContact, ContactSource, SearchFilters};

/// Synthetic generator with an optional LLM backing.
pub struct SyntheticGenerator {
    ai: Option<Arc<dyn ProspectAI>>,
}

impl SyntheticGenerator {
    pub fn new(ai: Option<Arc<dyn ProspectAI>>) -> Self {
        Self { ai }
    }

    /// Produce fallback records, LLM first, static floor second.
    ///
    /// Always terminates with a non-empty list for `count >= 1`.
    pub async fn generate(
        &self,
        filters: &SearchFilters,
        count: usize,
    ) -> (Vec<CandidateContact>, ContactSource) {
        if let Some(ai) = &self.ai {
            match ai.generate_prospects(filters, count).await {
                Ok(mut contacts) if !contacts.is_empty() => {
                    for contact in &mut contacts {
                        contact.source = ContactSource::Synthetic;
                    }
                    return (contacts, ContactSource::Synthetic);
                }
                Ok(_) => warn!("synthetic generator returned no records"),
                Err(e) => warn!(error = %e, "synthetic generation failed"),
            }
        }

        (
            static_records(filters, count),
            ContactSource::StaticFallback,
        )
    }
}

/// Built-in example records, the floor of the fallback chain.
pub fn static_records(filters: &SearchFilters, count: usize) -> Vec<CandidateContact> {
    let industry = filters
        .primary_industry()
        .unwrap_or("Technology")
        .to_string();
    let location = if filters.location.trim().is_empty() {
        "San Francisco, CA".to_string()
    } else {
        filters.location.trim().to_string()
    };
    let position = filters.primary_position().unwrap_or("CEO").to_string();

    let seed = [
        (
            "Sarah",
            "Johnson",
            "sarah.johnson@techstartup.com",
            "TechStartup Inc",
            "CEO",
            "https://linkedin.com/in/sarah-johnson",
            "https://techstartup.com",
        ),
        (
            "Michael",
            "Chen",
            "michael.chen@innovativesolutions.com",
            "Innovative Solutions",
            position.as_str(),
            "https://linkedin.com/in/michael-chen",
            "https://innovativesolutions.com",
        ),
        (
            "Emily",
            "Rodriguez",
            "emily.rodriguez@futuretech.io",
            "FutureTech",
            "CTO",
            "https://linkedin.com/in/emily-rodriguez",
            "https://futuretech.io",
        ),
    ];

    seed.iter()
        .take(count.max(1))
        .map(|(first, last, email, company, role, linkedin, website)| {
            let mut contact = CandidateContact::new(ContactSource::StaticFallback)
                .with_name(first, last)
                .with_email(*email)
                .with_company(*company)
                .with_position(*role)
                .with_industry(industry.clone())
                .with_location(location.clone())
                .with_confidence(90);
            contact.linkedin_url = Some(linkedin.to_string());
            contact.website = Some(website.to_string());
            contact.summary = Some(format!(
                "{} at {} with experience in {}.",
                role, company, industry
            ));
            contact
        })
        .collect()
}
