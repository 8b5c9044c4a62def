//! Registry of configured search backends
//!
//! Built once at startup and shared read-only by every request.

use super::traits::Codesearch;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// A named search backend
#[derive(Clone)]
pub struct Backend {
    pub id: String,
    pub client: Arc<dyn Codesearch>,
}

impl Backend {
    pub fn new(id: impl Into<String>, client: Arc<dyn Codesearch>) -> Self {
        Self {
            id: id.into(),
            client,
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").field("id", &self.id).finish()
    }
}

/// Why no backend could be selected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("Unknown backend: {0}")]
    NotFound(String),

    #[error("No backends configured")]
    NoBackends,
}

/// Immutable set of backends keyed by id
#[derive(Default)]
pub struct BackendRegistry {
    backends: BTreeMap<String, Backend>,
}

impl BackendRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend, replacing any previous one with the same id
    pub fn register(&mut self, backend: Backend) {
        self.backends.insert(backend.id.clone(), backend);
    }

    /// Get a backend by id
    pub fn get(&self, id: &str) -> Option<&Backend> {
        self.backends.get(id)
    }

    /// Resolve an optional backend name.
    ///
    /// Without a name, the backend with the lexicographically smallest id is
    /// chosen, so the default never depends on configuration order.
    pub fn select(&self, name: Option<&str>) -> Result<&Backend, SelectError> {
        match name {
            Some(name) => self
                .backends
                .get(name)
                .ok_or_else(|| SelectError::NotFound(name.to_string())),
            None => self
                .backends
                .values()
                .next()
                .ok_or(SelectError::NoBackends),
        }
    }

    /// All backend ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        self.backends.keys().map(|s| s.as_str()).collect()
    }

    /// Get number of registered backends
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl FromIterator<Backend> for BackendRegistry {
    fn from_iter<I: IntoIterator<Item = Backend>>(iter: I) -> Self {
        let mut registry = Self::new();
        for backend in iter {
            registry.register(backend);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::proto::CodeSearchResult;
    use crate::backends::status::RpcStatus;
    use crate::backends::traits::CallMetadata;
    use crate::query::Query;
    use async_trait::async_trait;

    struct Idle;

    #[async_trait]
    impl Codesearch for Idle {
        async fn search(
            &self,
            _query: &Query,
            _metadata: &CallMetadata,
        ) -> Result<CodeSearchResult, RpcStatus> {
            Ok(CodeSearchResult::default())
        }
    }

    fn registry(ids: &[&str]) -> BackendRegistry {
        ids.iter()
            .map(|id| Backend::new(*id, Arc::new(Idle)))
            .collect()
    }

    #[test]
    fn test_single_backend_is_default() {
        let registry = registry(&["main"]);
        assert_eq!(registry.select(None).unwrap().id, "main");
    }

    #[test]
    fn test_default_is_smallest_id() {
        let registry = registry(&["zeta", "alpha", "mid"]);
        assert_eq!(registry.select(None).unwrap().id, "alpha");
        assert_eq!(registry.ids(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_select_by_name() {
        let registry = registry(&["a", "b"]);
        assert_eq!(registry.select(Some("b")).unwrap().id, "b");
    }

    #[test]
    fn test_unknown_name() {
        let registry = registry(&["a"]);
        assert_eq!(
            registry.select(Some("nope")).unwrap_err(),
            SelectError::NotFound("nope".to_string())
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = BackendRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.select(None).unwrap_err(), SelectError::NoBackends);
        assert!(matches!(
            registry.select(Some("main")),
            Err(SelectError::NotFound(_))
        ));
    }
}
