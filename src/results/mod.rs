//! Results module
//!
//! Public reply types of the search API and the mapping from backend
//! records into them.

mod shape;
mod types;

pub use shape::browse_url;
pub use types::*;
