//! Search execution against a single backend

use super::models::{RequestContext, SearchError};
use crate::backends::{Backend, BackendRegistry, CallMetadata, SelectError};
use crate::query::Query;
use crate::results::SearchReply;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Deadline for one backend call, measured from dispatch
pub const SEARCH_DEADLINE: Duration = Duration::from_secs(30);

/// Dispatches canonical queries to backends and shapes their replies
pub struct SearchOrchestrator {
    /// Backend registry, fixed at startup
    registry: Arc<BackendRegistry>,
    /// Per-call deadline
    deadline: Duration,
}

impl SearchOrchestrator {
    /// Create a new orchestrator over `registry`
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self {
            registry,
            deadline: SEARCH_DEADLINE,
        }
    }

    /// Set the per-call deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Backend registry this orchestrator dispatches to
    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Resolve an optional backend name against the registry
    pub fn select(&self, name: Option<&str>) -> Result<&Backend, SelectError> {
        self.registry.select(name)
    }

    /// Run `query` on `backend`.
    ///
    /// The call is abandoned once the deadline passes. Dropping the returned
    /// future (e.g. when the client disconnects) cancels the backend call too.
    pub async fn dispatch(
        &self,
        ctx: &RequestContext,
        backend: &Backend,
        query: &Query,
    ) -> Result<SearchReply, SearchError> {
        let start = Instant::now();
        let metadata = CallMetadata {
            request_id: ctx.request_id.clone(),
        };

        debug!(
            backend = %backend.id,
            request_id = ?ctx.request_id,
            deadline = ?self.deadline,
            "dispatching search"
        );

        let result = match timeout(self.deadline, backend.client.search(query, &metadata)).await {
            Ok(Ok(result)) => result,
            Ok(Err(status)) => {
                warn!(backend = %backend.id, err = %status, "error talking to backend");
                return Err(SearchError::from_status(status));
            }
            Err(_) => {
                warn!(backend = %backend.id, deadline = ?self.deadline, "timed out talking to backend");
                return Err(SearchError::Timeout(self.deadline));
            }
        };

        let total_time = start.elapsed().as_millis() as i64;
        Ok(SearchReply::from_backend(
            result,
            query.search_type(),
            total_time,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::fake::FakeBackend;
    use crate::backends::proto::{CodeSearchResult, ExitReason, SearchResult};
    use crate::backends::{Code, RpcStatus};
    use crate::results::SearchType;

    fn setup(fake: Arc<FakeBackend>) -> (SearchOrchestrator, Backend) {
        let backend = Backend::new("main", fake);
        let registry: BackendRegistry = std::iter::once(backend.clone()).collect();
        (SearchOrchestrator::new(Arc::new(registry)), backend)
    }

    fn two_lines() -> CodeSearchResult {
        CodeSearchResult {
            results: vec![
                SearchResult {
                    path: "a.rs".to_string(),
                    line: "foo()".to_string(),
                    ..Default::default()
                },
                SearchResult {
                    path: "b.rs".to_string(),
                    line: "let foo".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let fake = Arc::new(FakeBackend::replying(two_lines()));
        let (search, backend) = setup(fake.clone());

        let reply = search
            .dispatch(&RequestContext::default(), &backend, &Query::line("foo"))
            .await
            .unwrap();

        assert_eq!(reply.results.len(), 2);
        assert_eq!(reply.results[0].path, "a.rs");
        assert!(reply.file_results.is_empty());
        assert!(reply.tree_results.is_empty());
        assert_eq!(reply.search_type, SearchType::Normal);
        assert_eq!(reply.info.exit_reason, ExitReason::None.as_str());
        assert!(reply.info.total_time >= 0);
        assert_eq!(fake.calls()[0].0, Query::line("foo"));
    }

    #[tokio::test]
    async fn test_request_id_forwarded() {
        let fake = Arc::new(FakeBackend::replying(CodeSearchResult::default()));
        let (search, backend) = setup(fake.clone());

        let ctx = RequestContext::new(Some("req-42".to_string()));
        search
            .dispatch(&ctx, &backend, &Query::line("x"))
            .await
            .unwrap();
        search
            .dispatch(&RequestContext::default(), &backend, &Query::line("x"))
            .await
            .unwrap();

        let calls = fake.calls();
        assert_eq!(calls[0].1, CallMetadata::with_request_id("req-42"));
        assert_eq!(calls[1].1.request_id, None);
    }

    #[tokio::test]
    async fn test_search_type_follows_query() {
        let fake = Arc::new(FakeBackend::replying(CodeSearchResult::default()));
        let (search, backend) = setup(fake);

        let query = Query {
            file: "main".to_string(),
            filename_only: true,
            treename_only: true,
            ..Default::default()
        };
        let reply = search
            .dispatch(&RequestContext::default(), &backend, &query)
            .await
            .unwrap();
        assert_eq!(reply.search_type, SearchType::FilenameOnly);
    }

    #[tokio::test]
    async fn test_invalid_argument_is_user_error() {
        let fake = Arc::new(FakeBackend::failing(RpcStatus::invalid_argument(
            "missing )",
        )));
        let (search, backend) = setup(fake);

        let err = search
            .dispatch(&RequestContext::default(), &backend, &Query::line("(x"))
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidQuery("missing )".to_string()));
    }

    #[tokio::test]
    async fn test_other_status_is_backend_error() {
        let status = RpcStatus::new(Code::Unavailable, "connection reset");
        let fake = Arc::new(FakeBackend::failing(status.clone()));
        let (search, backend) = setup(fake);

        let err = search
            .dispatch(&RequestContext::default(), &backend, &Query::line("x"))
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::Backend(status));
    }

    #[tokio::test]
    async fn test_deadline_cancels_backend_call() {
        let fake = Arc::new(
            FakeBackend::replying(CodeSearchResult::default()).delayed(Duration::from_secs(60)),
        );
        let (search, backend) = setup(fake.clone());
        let search = search.with_deadline(Duration::from_millis(50));

        let err = search
            .dispatch(&RequestContext::default(), &backend, &Query::line("x"))
            .await
            .unwrap_err();

        assert_eq!(err, SearchError::Timeout(Duration::from_millis(50)));
        assert!(fake.was_cancelled());
    }

    #[tokio::test]
    async fn test_dropping_dispatch_cancels_backend_call() {
        let fake = Arc::new(
            FakeBackend::replying(CodeSearchResult::default()).delayed(Duration::from_secs(60)),
        );
        let (search, backend) = setup(fake.clone());

        let query = Query::line("x");
        let ctx = RequestContext::default();
        let call = search.dispatch(&ctx, &backend, &query);
        let outcome = tokio::time::timeout(Duration::from_millis(50), call).await;

        assert!(outcome.is_err());
        assert!(fake.was_cancelled());
    }

    #[test]
    fn test_select_delegates_to_registry() {
        let fake = Arc::new(FakeBackend::replying(CodeSearchResult::default()));
        let (search, _) = setup(fake);
        assert_eq!(search.select(None).unwrap().id, "main");
        assert!(search.select(Some("other")).is_err());
        assert_eq!(search.registry().len(), 1);
    }
}
