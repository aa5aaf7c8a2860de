//! Composite prospect scoring.
//!
//! The weights are an implementation default, not a correctness requirement;
//! what matters is the qualitative ordering: senior roles score higher,
//! validated emails score higher, network-sourced profiles get a trust bump.

use crate::types::{CandidateContact, ContactSource, EmailValidation};

/// Lower bound of the composite score.
pub const SCORE_FLOOR: u8 = 20;

/// Upper bound of the composite score.
pub const SCORE_CEILING: u8 = 100;

/// Role keywords that mark a decision-maker.
pub const SENIOR_ROLE_KEYWORDS: &[&str] = &[
    "ceo",
    "cto",
    "cfo",
    "president",
    "director",
    "vp",
    "vice president",
];

/// Whether a position names a senior role (case-insensitive substring).
pub fn is_senior_role(position: &str) -> bool {
    let lower = position.to_lowercase();
    SENIOR_ROLE_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn has_real_website(contact: &CandidateContact) -> bool {
    contact
        .website
        .as_deref()
        .map(|w| {
            let w = w.to_lowercase();
            !w.trim().is_empty() && !w.contains("example.com") && !w.contains("placeholder")
        })
        .unwrap_or(false)
}

/// Composite 0-100 rank for a validated candidate.
///
/// Starts at 50 and accumulates email confidence, role seniority, website
/// presence, and source trust; clamped to [20, 100].
pub fn composite_score(
    contact: &CandidateContact,
    validation: Option<&EmailValidation>,
) -> u8 {
    let mut score = 50.0_f32;

    if let Some(validation) = validation {
        score += 0.3 * validation.confidence as f32;
    }

    if is_senior_role(&contact.position) {
        score += 20.0;
    }

    if has_real_website(contact) {
        score += 10.0;
    }

    if contact.source == ContactSource::WebSearch {
        score += 15.0;
    }

    score += 0.2 * contact.confidence as f32;

    score.clamp(SCORE_FLOOR as f32, SCORE_CEILING as f32).round() as u8
}
