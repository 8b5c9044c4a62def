//! In-process backend for tests

use super::proto::CodeSearchResult;
use super::status::RpcStatus;
use super::traits::{CallMetadata, Codesearch};
use crate::query::Query;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Backend answering every call with a fixed outcome
pub(crate) struct FakeBackend {
    outcome: Result<CodeSearchResult, RpcStatus>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(Query, CallMetadata)>>,
    cancelled: AtomicBool,
}

impl FakeBackend {
    pub fn replying(result: CodeSearchResult) -> Self {
        Self::with_outcome(Ok(result))
    }

    pub fn failing(status: RpcStatus) -> Self {
        Self::with_outcome(Err(status))
    }

    fn with_outcome(outcome: Result<CodeSearchResult, RpcStatus>) -> Self {
        Self {
            outcome,
            delay: None,
            calls: Mutex::new(Vec::new()),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Hold every call for `delay` before answering
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<(Query, CallMetadata)> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether a call was dropped before it answered
    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

struct CancelGuard<'a> {
    flag: &'a AtomicBool,
    armed: bool,
}

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.flag.store(true, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl Codesearch for FakeBackend {
    async fn search(
        &self,
        query: &Query,
        metadata: &CallMetadata,
    ) -> Result<CodeSearchResult, RpcStatus> {
        self.calls
            .lock()
            .unwrap()
            .push((query.clone(), metadata.clone()));

        if let Some(delay) = self.delay {
            let mut guard = CancelGuard {
                flag: &self.cancelled,
                armed: true,
            };
            tokio::time::sleep(delay).await;
            guard.armed = false;
        }

        self.outcome.clone()
    }
}
