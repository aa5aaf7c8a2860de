//! Application setup and dependency wiring.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use prospecting::{
    CompanySiteStrategy, ContactExtractor, DirectoryStrategy, DiscoveryOrchestrator,
    DnsMxResolver, DuckDuckGoSearcher, EmailChecker, HttpFetcher, MemoryStore,
    NetworkSearchStrategy, OpenAiProspectAI, OrchestratorConfig,
};
use prospecting::traits::{ProspectAI, ProspectStore, SourceStrategy};

use crate::config::Config;
use crate::routes;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<DiscoveryOrchestrator>,
    pub store: Arc<dyn ProspectStore>,
    pub ai: Option<Arc<dyn ProspectAI>>,
}

/// Build the router over an already-wired state (used directly by tests).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_handler))
        .route(
            "/api/prospects/discover",
            post(routes::prospects::discover_handler),
        )
        .route(
            "/api/prospects/score",
            post(routes::prospects::score_handler),
        )
        .route(
            "/api/prospects/:id/insights",
            post(routes::prospects::insights_handler),
        )
        .route(
            "/api/prospects/:id/outreach",
            post(routes::prospects::outreach_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Wire the real pipeline from configuration and build the application.
pub fn build_app(config: &Config) -> Router {
    let fetch_timeout = Duration::from_secs(config.fetch_timeout_secs);
    let fetcher = Arc::new(HttpFetcher::with_timeout(fetch_timeout));
    let searcher = Arc::new(DuckDuckGoSearcher::new());
    let extractor = Arc::new(ContactExtractor::new());
    let checker = Arc::new(EmailChecker::new(Arc::new(DnsMxResolver::new())));

    // Priority order: directory, professional-network, company-site.
    let strategies: Vec<Arc<dyn SourceStrategy>> = vec![
        Arc::new(DirectoryStrategy::new(fetcher.clone(), extractor.clone())),
        Arc::new(NetworkSearchStrategy::new(
            searcher.clone(),
            extractor.clone(),
            checker.clone(),
        )),
        Arc::new(CompanySiteStrategy::new(searcher, fetcher, extractor)),
    ];

    let ai: Option<Arc<dyn ProspectAI>> = config.openai_api_key.as_ref().map(|key| {
        let mut client = OpenAiProspectAI::new(key.clone());
        if let Some(model) = &config.openai_model {
            client = client.with_model(model.clone());
        }
        Arc::new(client) as Arc<dyn ProspectAI>
    });

    let mut orchestrator = DiscoveryOrchestrator::new(strategies, checker).with_config(
        OrchestratorConfig {
            strategy_timeout: Duration::from_secs(config.strategy_timeout_secs),
            ..OrchestratorConfig::default()
        },
    );
    if let Some(ai) = &ai {
        orchestrator = orchestrator.with_synthetic_ai(ai.clone());
    }

    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        store: Arc::new(MemoryStore::new()),
        ai,
    };

    build_router(state)
}
