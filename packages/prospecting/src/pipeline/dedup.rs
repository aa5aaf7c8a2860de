//! Candidate deduplication.

use std::collections::HashSet;

use crate::types::CandidateContact;

/// Collapse duplicates, first occurrence wins.
///
/// Key is the normalized email when present, else the normalized
/// (first, last, company) triple; comparison is case-insensitive. Running
/// this on its own output changes nothing.
pub fn dedup_contacts(contacts: Vec<CandidateContact>) -> Vec<CandidateContact> {
    let mut seen = HashSet::new();
    contacts
        .into_iter()
        .filter(|contact| seen.insert(contact.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContactSource;

    fn contact(first: &str, last: &str, company: &str, email: Option<&str>) -> CandidateContact {
        let mut c = CandidateContact::new(ContactSource::WebSearch)
            .with_name(first, last)
            .with_company(company);
        c.email = email.map(str::to_string);
        c
    }

    #[test]
    fn test_dedup_by_email_case_insensitive() {
        let contacts = vec![
            contact("Jane", "Doe", "Acme", Some("jane@acme.com")),
            contact("Janet", "Doeman", "Other", Some("JANE@ACME.COM")),
        ];
        let deduped = dedup_contacts(contacts);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].first_name, "Jane");
    }

    #[test]
    fn test_dedup_by_name_company_triple() {
        let contacts = vec![
            contact("Jane", "Doe", "Acme", None),
            contact("jane", "doe", "ACME", None),
            contact("Jane", "Doe", "Other Co", None),
        ];
        let deduped = dedup_contacts(contacts);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let contacts = vec![
            contact("Jane", "Doe", "Acme", Some("jane@acme.com")),
            contact("Alan", "Smith", "Acme", None),
            contact("Jane", "Doe", "Acme", Some("jane@acme.com")),
        ];
        let once = dedup_contacts(contacts);
        let keys: Vec<String> = once.iter().map(|c| c.dedup_key()).collect();

        let twice = dedup_contacts(once.clone());
        let keys_again: Vec<String> = twice.iter().map(|c| c.dedup_key()).collect();

        assert_eq!(once.len(), twice.len());
        assert_eq!(keys, keys_again);
    }
}
