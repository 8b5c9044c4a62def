//! Codesearch web: query normalization and backend orchestration for a code
//! search service.
//!
//! Merges the free-form and legacy query parameters into one canonical
//! regex query, selects a backend, dispatches the query under a deadline and
//! shapes the reply (or a classified error) for HTTP clients.

pub mod backends;
pub mod config;
pub mod metrics;
pub mod network;
pub mod query;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use query::Query;
pub use results::SearchReply;
pub use search::SearchOrchestrator;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
