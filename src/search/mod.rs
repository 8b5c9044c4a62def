//! Search orchestration module
//!
//! Issues canonical queries to the selected backend under a deadline,
//! classifies failures and shapes results.

mod executor;
mod models;

pub use executor::{SearchOrchestrator, SEARCH_DEADLINE};
pub use models::*;
