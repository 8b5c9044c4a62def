//! Settings structures for the code search web server

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Main settings structure, loaded once at startup and never mutated afterwards
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub backends: Vec<BackendConfig>,
    pub metrics: MetricsSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (CODESEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("CODESEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("CODESEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("CODESEARCH_DEFAULT_MAX_MATCHES") {
            if let Ok(max) = val.parse() {
                self.search.default_max_matches = max;
            }
        }
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for backend in &self.backends {
            if backend.id.is_empty() {
                bail!("backend with addr {:?} has an empty id", backend.addr);
            }
            if backend.addr.is_empty() {
                bail!("backend {:?} has an empty addr", backend.id);
            }
            if !seen.insert(backend.id.as_str()) {
                bail!("duplicate backend id: {}", backend.id);
            }
        }
        let connect_timeout = self.outgoing.connect_timeout;
        if !connect_timeout.is_finite() || connect_timeout <= 0.0 {
            bail!("outgoing.connect_timeout must be a positive number of seconds");
        }
        if self.search.deadline_secs == 0 {
            bail!("search.deadline_secs must be positive");
        }
        Ok(())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8910,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Match limit substituted when a query does not carry one
    pub default_max_matches: i32,
    /// Deadline for a single backend call, in seconds
    pub deadline_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_max_matches: 50,
            deadline_secs: 30,
        }
    }
}

/// Settings for the transport used to reach backends
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// TCP connect timeout in seconds
    pub connect_timeout: f64,
    /// Idle connections kept per backend
    pub pool_maxsize: usize,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            connect_timeout: 2.0,
            pool_maxsize: 20,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// A search backend to connect to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Unique identifier, addressable as `/api/v1/search/{id}`
    pub id: String,
    /// Base URL of the backend, e.g. `http://localhost:9999`
    pub addr: String,
}

impl BackendConfig {
    pub fn new(id: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            addr: addr.into(),
        }
    }
}

/// Metrics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Record per-request counters and timers
    pub enabled: bool,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}
