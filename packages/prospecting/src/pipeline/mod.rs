//! Discovery pipeline: dedup, scoring, fallback generation, orchestration.

pub mod dedup;
pub mod orchestrator;
pub mod score;
pub mod synthetic;

pub use dedup::dedup_contacts;
pub use orchestrator::{DiscoveryOrchestrator, OrchestratorConfig};
pub use score::{composite_score, is_senior_role, SCORE_CEILING, SCORE_FLOOR, SENIOR_ROLE_KEYWORDS};
pub use synthetic::{static_records, SyntheticGenerator};
