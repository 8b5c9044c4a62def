//! Application state shared across handlers

use crate::backends::BackendRegistry;
use crate::config::Settings;
use crate::metrics::{Metrics, MetricsSink};
use crate::search::SearchOrchestrator;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state; everything in it is fixed at startup
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search orchestrator, owning the backend registry
    pub search: Arc<SearchOrchestrator>,
    /// Metrics sink, absent when metrics are disabled
    pub metrics: Option<Arc<dyn MetricsSink>>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: BackendRegistry) -> Self {
        let search = SearchOrchestrator::new(Arc::new(registry))
            .with_deadline(Duration::from_secs(settings.search.deadline_secs));
        let metrics = settings
            .metrics
            .enabled
            .then(|| Arc::new(Metrics::new()) as Arc<dyn MetricsSink>);

        Self {
            settings: Arc::new(settings),
            search: Arc::new(search),
            metrics,
        }
    }

    /// Replace the metrics sink
    pub fn with_metrics(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(sink);
        self
    }
}
