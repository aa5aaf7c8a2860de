//! Email plausibility checking and candidate generation.

pub mod checker;
pub mod patterns;

pub use checker::{DnsMxResolver, EmailChecker, MxResolver, MX_CACHE_TTL};
pub use patterns::{derive_domain, RankedEmail, FREE_MAIL_DOMAINS};
