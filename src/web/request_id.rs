//! Correlation id propagation
//!
//! Every request gets an id: the inbound `X-Request-Id` when the client
//! sent one, a fresh UUID otherwise. Handlers read it from the request
//! extensions and it is echoed on the response.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Inbound and outbound correlation header
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation id of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Middleware attaching a [`RequestId`] to every request
pub async fn propagate_request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID.clone(), value);
    }
    response
}
