//! Backend traits and types

use super::proto::CodeSearchResult;
use super::status::RpcStatus;
use crate::query::Query;
use async_trait::async_trait;

/// Out-of-band attributes sent along with a backend call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallMetadata {
    /// Correlation id for cross-service logs
    pub request_id: Option<String>,
}

impl CallMetadata {
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
        }
    }
}

/// The `Search` RPC exposed by every code search backend.
///
/// Implementations must be safe to share across any number of in-flight
/// requests. Dropping the returned future cancels the call.
#[async_trait]
pub trait Codesearch: Send + Sync {
    /// Run a canonical query and return the complete result payload
    async fn search(
        &self,
        query: &Query,
        metadata: &CallMetadata,
    ) -> Result<CodeSearchResult, RpcStatus>;
}
