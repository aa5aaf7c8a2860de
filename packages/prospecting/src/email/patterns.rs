//! Email pattern generation and heuristic scoring.

use serde::Serialize;

/// A generated email candidate with its plausibility score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEmail {
    pub email: String,
    pub score: u8,
    pub pattern: &'static str,
}

/// Public free-mail domains, penalized for business contacts.
pub const FREE_MAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

/// Lowercase a name part and drop everything but letters.
pub(crate) fn sanitize_name_part(part: &str) -> String {
    part.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect()
}

/// Derive an email domain from a company name or an already-given domain.
///
/// Inputs containing a dot and no whitespace are treated as domains (minus a
/// `www.` prefix). Company names are squashed to alphanumerics, stripped of a
/// trailing corporate suffix, and given a `.com` TLD.
pub fn derive_domain(company_or_domain: &str) -> Option<String> {
    let input = company_or_domain.trim();
    if input.is_empty() {
        return None;
    }

    if input.contains('.') && !input.contains(char::is_whitespace) {
        let domain = input
            .to_lowercase()
            .trim_start_matches("www.")
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string();
        return if domain.contains('.') {
            Some(domain)
        } else {
            None
        };
    }

    let mut squashed: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    for suffix in ["inc", "corp", "llc", "ltd"] {
        if squashed.ends_with(suffix) {
            squashed.truncate(squashed.len() - suffix.len());
            break;
        }
    }

    if squashed.is_empty() {
        None
    } else {
        Some(format!("{}.com", squashed))
    }
}

/// The standard local-part permutation set, in ranking-input order.
///
/// Returns (local part, pattern name) pairs; empty when either name part
/// sanitizes to nothing.
pub(crate) fn generate_local_parts(first: &str, last: &str) -> Vec<(String, &'static str)> {
    let first = sanitize_name_part(first);
    let last = sanitize_name_part(last);

    if first.is_empty() || last.is_empty() {
        return Vec::new();
    }

    let f_initial = first.chars().next().unwrap_or_default();
    let l_initial = last.chars().next().unwrap_or_default();

    vec![
        (format!("{}.{}", first, last), "first.last"),
        (first.clone(), "first"),
        (last.clone(), "last"),
        (format!("{}{}", first, last), "firstlast"),
        (format!("{}_{}", first, last), "first_last"),
        (format!("{}{}", f_initial, last), "flast"),
        (format!("{}{}", first, l_initial), "firstl"),
        (format!("{}.{}", first, l_initial), "first.l"),
    ]
}

/// Whether a domain plausibly belongs to the company.
pub(crate) fn domain_matches_company(domain: &str, company: &str) -> bool {
    let company_words: String = company
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();
    if company_words.is_empty() {
        return false;
    }

    let domain_root = domain.split('.').next().unwrap_or_default();
    if domain_root.is_empty() {
        return false;
    }

    domain.contains(&company_words) || company_words.contains(domain_root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name_part() {
        assert_eq!(sanitize_name_part("  Jean-Luc "), "jeanluc");
        assert_eq!(sanitize_name_part("O'Malley"), "omalley");
        assert_eq!(sanitize_name_part("$%^"), "");
    }

    #[test]
    fn test_derive_domain_from_company() {
        assert_eq!(derive_domain("Acme Corp"), Some("acme.com".to_string()));
        assert_eq!(
            derive_domain("Innovative Solutions Inc"),
            Some("innovativesolutions.com".to_string())
        );
        assert_eq!(derive_domain(""), None);
        assert_eq!(derive_domain("!!!"), None);
    }

    #[test]
    fn test_derive_domain_passthrough() {
        assert_eq!(derive_domain("acme.com"), Some("acme.com".to_string()));
        assert_eq!(derive_domain("www.Acme.com"), Some("acme.com".to_string()));
        assert_eq!(
            derive_domain("acme.com/contact"),
            Some("acme.com".to_string())
        );
    }

    #[test]
    fn test_generate_local_parts() {
        let parts = generate_local_parts("Jane", "Doe");
        let locals: Vec<&str> = parts.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            locals,
            vec![
                "jane.doe", "jane", "doe", "janedoe", "jane_doe", "jdoe", "janed", "jane.d"
            ]
        );
        assert!(generate_local_parts("", "Doe").is_empty());
        assert!(generate_local_parts("Jane", "  ").is_empty());
    }

    #[test]
    fn test_domain_matches_company() {
        assert!(domain_matches_company("acme.com", "Acme Corp"));
        assert!(domain_matches_company("acmecorp.com", "Acme"));
        assert!(!domain_matches_company("example.com", "Acme Corp"));
        assert!(!domain_matches_company("acme.com", "123"));
    }
}
