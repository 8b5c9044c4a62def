//! Web server module
//!
//! Provides the HTTP search API: routing, correlation ids, handlers and the
//! mapping of failures to error replies.

mod error;
mod handlers;
mod request_id;
mod routes;
mod state;

pub use error::ApiError;
pub use request_id::{RequestId, X_REQUEST_ID};
pub use routes::create_router;
pub use state::AppState;
