//! Metrics collection module
//!
//! Per-request counters and timers under fixed names. The sink is a trait so
//! deployments can forward to statsd or similar; [`Metrics`] keeps everything
//! in memory.

use crate::results::Stats;
use std::collections::HashMap;
use std::sync::RwLock;

/// Receiver of named counters and timers
pub trait MetricsSink: Send + Sync {
    /// Increment a counter by one
    fn increment(&self, name: &str);

    /// Record a duration in milliseconds
    fn timing(&self, name: &str, millis: i64);
}

/// Record one successful search
pub fn record_search(sink: &dyn MetricsSink, stats: &Stats) {
    sink.increment("api.search.v1.invocations");
    sink.increment(&format!("api.search.v1.exit_reason.{}", stats.exit_reason));
    sink.timing("api.search.v1.re2_time", stats.re2_time);
    sink.timing("api.search.v1.git_time", stats.git_time);
    sink.timing("api.search.v1.sort_time", stats.sort_time);
    sink.timing("api.search.v1.index_time", stats.index_time);
    sink.timing("api.search.v1.analyze_time", stats.analyze_time);
    sink.timing("api.search.v1.total_time", stats.total_time);
}

/// In-memory metrics collector
pub struct Metrics {
    counters: RwLock<HashMap<String, u64>>,
    /// Last 100 samples per timer
    timings: RwLock<HashMap<String, Vec<i64>>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            counters: RwLock::new(HashMap::new()),
            timings: RwLock::new(HashMap::new()),
        }
    }

    /// Current value of a counter
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.read().unwrap();
        *counters.get(name).unwrap_or(&0)
    }

    /// Average of the recorded samples of a timer
    pub fn avg_timing(&self, name: &str) -> Option<i64> {
        let timings = self.timings.read().unwrap();
        timings.get(name).and_then(|t| {
            if t.is_empty() {
                None
            } else {
                Some(t.iter().sum::<i64>() / t.len() as i64)
            }
        })
    }
}

impl MetricsSink for Metrics {
    fn increment(&self, name: &str) {
        let mut counters = self.counters.write().unwrap();
        *counters.entry(name.to_string()).or_insert(0) += 1;
    }

    fn timing(&self, name: &str, millis: i64) {
        let mut timings = self.timings.write().unwrap();
        let entry = timings.entry(name.to_string()).or_insert_with(Vec::new);

        if entry.len() >= 100 {
            entry.remove(0);
        }
        entry.push(millis);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
