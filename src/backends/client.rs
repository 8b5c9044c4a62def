//! HTTP/JSON transport for the backend `Search` call
//!
//! `POST {addr}/api/v1/codesearch/search` with the canonical query as a JSON
//! body. A 2xx reply carries a [`CodeSearchResult`]; anything else carries an
//! [`RpcStatus`] body (`{"code": "INVALID_ARGUMENT", "message": "..."}`).
//!
//! Connection failures are transient: the client keeps trying to deliver
//! the call, backing off between attempts, until the caller's deadline drops
//! the future. Any reply from the backend is definitive.

use super::proto::CodeSearchResult;
use super::status::{Code, RpcStatus};
use super::traits::{CallMetadata, Codesearch};
use crate::network::HttpClient;
use crate::query::Query;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Path of the search call on a backend
pub const SEARCH_PATH: &str = "/api/v1/codesearch/search";

/// Header carrying the correlation id
pub const REQUEST_ID_HEADER: &str = "Request-Id";

/// Backend reached over HTTP
pub struct HttpCodesearch {
    client: HttpClient,
    url: String,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl HttpCodesearch {
    /// Create a client for the backend at `addr` (e.g. `http://host:9999`)
    pub fn new(client: HttpClient, addr: &str) -> Self {
        Self {
            client,
            url: format!("{}{}", addr.trim_end_matches('/'), SEARCH_PATH),
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
        }
    }

    /// Set the delay between delivery attempts while the backend is unreachable
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max.max(initial);
        self
    }

    /// Endpoint this client posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(
        &self,
        query: &Query,
        metadata: &CallMetadata,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self.client.inner().post(&self.url).json(query);
        if let Some(ref id) = metadata.request_id {
            request = request.header(REQUEST_ID_HEADER, id);
        }
        request.send().await
    }
}

#[async_trait]
impl Codesearch for HttpCodesearch {
    async fn search(
        &self,
        query: &Query,
        metadata: &CallMetadata,
    ) -> Result<CodeSearchResult, RpcStatus> {
        let mut backoff = self.initial_backoff;

        let response = loop {
            match self.send(query, metadata).await {
                Ok(response) => break response,
                Err(e) if e.is_connect() => {
                    debug!(url = %self.url, error = %e, ?backoff, "backend not ready, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(self.max_backoff);
                }
                Err(e) if e.is_timeout() => {
                    return Err(RpcStatus::new(Code::DeadlineExceeded, e.to_string()));
                }
                Err(e) => return Err(RpcStatus::unavailable(e.to_string())),
            }
        };

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RpcStatus::unavailable(e.to_string()))?;

        if status.is_success() {
            serde_json::from_slice(&body)
                .map_err(|e| RpcStatus::internal(format!("decoding backend reply: {}", e)))
        } else {
            Err(decode_status(status, &body))
        }
    }
}

/// Decode an error reply, falling back to the gRPC HTTP status mapping
fn decode_status(status: StatusCode, body: &[u8]) -> RpcStatus {
    serde_json::from_slice::<RpcStatus>(body).unwrap_or_else(|_| {
        let code = match status.as_u16() {
            400 => Code::Internal,
            401 => Code::Unauthenticated,
            403 => Code::PermissionDenied,
            404 => Code::Unimplemented,
            429 | 502 | 503 | 504 => Code::Unavailable,
            _ => Code::Unknown,
        };
        let text = String::from_utf8_lossy(body).trim().to_string();
        let message = if text.is_empty() {
            status.to_string()
        } else {
            text
        };
        RpcStatus::new(code, message)
    })
}
