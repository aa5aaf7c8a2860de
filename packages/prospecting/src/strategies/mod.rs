//! Source strategy implementations.
//!
//! All three strategies share one contract (`SourceStrategy`) and the same
//! injected collaborators (web searcher, page fetcher, contact extractor,
//! email checker) rather than re-implementing extraction per channel.

pub mod company_site;
pub mod directory;
pub mod network;

pub use company_site::CompanySiteStrategy;
pub use directory::DirectoryStrategy;
pub use network::NetworkSearchStrategy;
