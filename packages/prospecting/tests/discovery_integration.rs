//! End-to-end pipeline tests with every collaborator mocked.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use prospecting::testing::{
    mock_checker_with, MockMxResolver, MockProspectAI, MockStrategy, MockWebSearcher,
};
use prospecting::{
    CandidateContact, ContactExtractor, ContactSource, DiscoveryOrchestrator, EmailChecker,
    ExtractionContext, NetworkSearchStrategy, SearchFilters, SearchHit,
};

fn checker_for(domains: &[&str]) -> Arc<EmailChecker> {
    let mut resolver = MockMxResolver::new();
    for domain in domains {
        resolver = resolver.with_domain(domain);
    }
    mock_checker_with(resolver)
}

#[tokio::test]
async fn strategy_short_circuit_stops_after_first_yield() {
    let directory = MockStrategy::new("directory", ContactSource::Directory).with_results(vec![
        CandidateContact::new(ContactSource::Directory)
            .with_name("Jane", "Doe")
            .with_company("Acme")
            .with_email("jane@acme.com"),
    ]);
    let network = MockStrategy::new("professional-network", ContactSource::WebSearch);
    let company_site = MockStrategy::new("company-site", ContactSource::CompanySite);

    let network_calls = network.call_count_handle();
    let site_calls = company_site.call_count_handle();

    let orchestrator = DiscoveryOrchestrator::new(
        vec![
            Arc::new(directory),
            Arc::new(network),
            Arc::new(company_site),
        ],
        checker_for(&["acme.com"]),
    );

    let result = orchestrator.discover(&SearchFilters::new()).await;

    assert_eq!(result.prospects.len(), 1);
    assert_eq!(network_calls.load(Ordering::SeqCst), 0);
    assert_eq!(site_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn austin_ceo_scenario_falls_back_when_strategies_are_dry() {
    // Spec scenario: all real strategies mocked to return empty.
    let filters = SearchFilters::new()
        .with_position("CEO")
        .with_location("Austin, TX")
        .with_limit(5);

    let orchestrator = DiscoveryOrchestrator::new(
        vec![
            Arc::new(MockStrategy::new("directory", ContactSource::Directory)),
            Arc::new(MockStrategy::new(
                "professional-network",
                ContactSource::WebSearch,
            )),
            Arc::new(MockStrategy::new(
                "company-site",
                ContactSource::CompanySite,
            )),
        ],
        checker_for(&[]),
    )
    .with_synthetic_ai(Arc::new(
        MockProspectAI::new().with_prospects(vec![
            CandidateContact::new(ContactSource::Synthetic)
                .with_name("Gen", "One")
                .with_company("Fabricated Inc")
                .with_position("CEO"),
            CandidateContact::new(ContactSource::Synthetic)
                .with_name("Gen", "Two")
                .with_company("Fabricated Inc")
                .with_position("CEO"),
        ]),
    ));

    let result = orchestrator.discover(&filters).await;

    assert!(result.generated);
    assert!(result.prospects.len() <= 5);
    assert!(!result.prospects.is_empty());
    assert!(result
        .prospects
        .iter()
        .all(|p| p.contact.source.is_generated()));
    assert!(result
        .prospects
        .iter()
        .all(|p| p.tags.iter().any(|t| t == "AI Generated")));
}

#[tokio::test]
async fn static_floor_holds_when_ai_also_fails() {
    let orchestrator = DiscoveryOrchestrator::new(
        vec![Arc::new(
            MockStrategy::new("directory", ContactSource::Directory).failing(),
        )],
        checker_for(&[]),
    )
    .with_synthetic_ai(Arc::new(MockProspectAI::new().failing()));

    let result = orchestrator
        .discover(&SearchFilters::new().with_limit(5))
        .await;

    assert!(result.generated);
    assert!(!result.prospects.is_empty());
    assert_eq!(result.source, Some(ContactSource::StaticFallback));
    assert!(result
        .prospects
        .iter()
        .all(|p| p.tags.iter().any(|t| t == "Demo Data")));
}

#[tokio::test]
async fn always_non_empty_even_for_empty_filters() {
    // No strategies, no AI, all-empty filter fields: the static floor holds.
    let orchestrator = DiscoveryOrchestrator::new(vec![], checker_for(&[]));
    let result = orchestrator
        .discover(&SearchFilters::new().with_limit(1))
        .await;

    assert!(!result.prospects.is_empty());
    assert!(result.generated);
}

#[tokio::test]
async fn jane_doe_page_flows_through_to_ranked_email() {
    // Spec scenario: a page saying "Jane Doe, CEO of Acme Corp" and no email.
    let extractor = ContactExtractor::new();
    let ctx = ExtractionContext::new(ContactSource::CompanySite);
    let candidates = extractor.extract("Jane Doe, CEO of Acme Corp", &ctx);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].first_name, "Jane");
    assert_eq!(candidates[0].last_name, "Doe");
    assert_eq!(candidates[0].position, "CEO");
    assert!(candidates[0].company.contains("Acme"));
    assert!(candidates[0].email.is_none());

    // The orchestrator generates and adopts the top-ranked candidate email.
    let strategy = MockStrategy::new("company-site", ContactSource::CompanySite)
        .with_results(candidates);
    let orchestrator =
        DiscoveryOrchestrator::new(vec![Arc::new(strategy)], checker_for(&["acme.com"]));

    let result = orchestrator.discover(&SearchFilters::new()).await;
    let prospect = &result.prospects[0];

    assert_eq!(prospect.contact.email.as_deref(), Some("jane.doe@acme.com"));
    assert!(prospect.validated);
    assert!(prospect.score >= 20 && prospect.score <= 100);
}

#[tokio::test]
async fn network_strategy_feeds_orchestrator_end_to_end() {
    let hits = vec![SearchHit::from_url("https://www.linkedin.com/in/jane-doe-91f3a2")
        .unwrap()
        .with_title("Jane Doe - CEO at Acme Corp")
        .with_snippet("Jane Doe is the CEO of Acme Corp in Austin, TX.")];
    let searcher = MockWebSearcher::new().with_default_results(hits);

    let checker = checker_for(&["acme.com"]);
    let strategy = NetworkSearchStrategy::new(
        Arc::new(searcher),
        Arc::new(ContactExtractor::new()),
        checker.clone(),
    );

    let filters = SearchFilters::new()
        .with_position("CEO")
        .with_industry("Technology")
        .with_location("Austin, TX")
        .with_limit(5);

    let orchestrator = DiscoveryOrchestrator::new(vec![Arc::new(strategy)], checker);
    let result = orchestrator.discover(&filters).await;

    assert!(!result.generated);
    assert_eq!(result.source, Some(ContactSource::WebSearch));
    assert_eq!(result.prospects.len(), 1);

    let prospect = &result.prospects[0];
    assert_eq!(prospect.contact.full_name(), "Jane Doe");
    assert_eq!(prospect.contact.email.as_deref(), Some("jane.doe@acme.com"));
    assert!(prospect.tags.iter().any(|t| t == "Real Contact"));
    // Senior role + validated email + network source: lands near the top band.
    assert!(prospect.score >= 80);
}
