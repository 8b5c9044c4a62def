//! Request context and failure classification for search calls

use crate::backends::{Code, RpcStatus};
use std::time::Duration;
use thiserror::Error;

/// Ambient attributes of the inbound request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation id, forwarded to the backend when present
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(request_id: Option<String>) -> Self {
        Self { request_id }
    }
}

/// Classified failure of a backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The backend rejected the query itself (caller-caused)
    #[error("{0}")]
    InvalidQuery(String),

    /// The call did not complete before the deadline
    #[error("timed out talking to backend")]
    Timeout(Duration),

    /// Any other backend or transport failure (server-caused)
    #[error(transparent)]
    Backend(RpcStatus),
}

impl SearchError {
    /// Classify a transport status: only `InvalidArgument` blames the caller
    pub fn from_status(status: RpcStatus) -> Self {
        match status.code {
            Code::InvalidArgument => Self::InvalidQuery(status.message),
            _ => Self::Backend(status),
        }
    }

    /// Whether the failure was caused by the request rather than the server
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }
}
