//! REST API boundary for the prospecting pipeline.
//!
//! Exposes discovery, per-contact insight enrichment, outreach-message
//! generation, and batch scoring over JSON. Everything else the original
//! CRM application did (auth, CRUD, exports, dashboards) stays out of scope.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;

pub use app::{build_app, build_router, AppState};
pub use config::Config;
