//! Backend loader for building the registry from configuration

use super::client::HttpCodesearch;
use super::registry::{Backend, BackendRegistry};
use crate::config::Settings;
use crate::network::HttpClient;
use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing backends from configuration
pub struct BackendLoader;

impl BackendLoader {
    /// Build one HTTP backend per configured entry.
    ///
    /// All backends share `client`'s connection pool.
    pub fn load(settings: &Settings, client: &HttpClient) -> Result<BackendRegistry> {
        let mut registry = BackendRegistry::new();

        for config in &settings.backends {
            if registry.get(&config.id).is_some() {
                bail!("duplicate backend id: {}", config.id);
            }
            let transport = HttpCodesearch::new(client.clone(), &config.addr);
            info!("Loaded backend: {} ({})", config.id, transport.url());
            registry.register(Backend::new(config.id.clone(), Arc::new(transport)));
        }

        if registry.is_empty() {
            warn!("No backends configured; every search will fail");
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    #[test]
    fn test_load_backends() {
        let mut settings = Settings::default();
        settings.backends = vec![
            BackendConfig::new("main", "http://localhost:9999"),
            BackendConfig::new("docs", "http://localhost:9998"),
        ];

        let registry = BackendLoader::load(&settings, &HttpClient::new().unwrap()).unwrap();
        assert_eq!(registry.ids(), vec!["docs", "main"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut settings = Settings::default();
        settings.backends = vec![
            BackendConfig::new("main", "http://a:1"),
            BackendConfig::new("main", "http://b:2"),
        ];

        assert!(BackendLoader::load(&settings, &HttpClient::new().unwrap()).is_err());
    }
}
