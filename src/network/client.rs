//! HTTP client shared by all backend connections

use crate::config::OutgoingSettings;
use anyhow::Result;
use reqwest::Client;
use std::time::Duration;

/// HTTP client wrapper configured from the `outgoing` settings.
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        // No overall request timeout: each search call carries its own deadline
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs_f64(settings.connect_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .user_agent(format!("codesearch-web/{}", crate::VERSION));

        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
