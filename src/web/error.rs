//! Classification of request failures into API error replies
//!
//! | Failure                          | Status | Code             |
//! |----------------------------------|--------|------------------|
//! | unknown backend name             | 400    | `bad_backend`    |
//! | malformed free-form query        | 400    | `bad_query`      |
//! | nothing to match                 | 400    | `bad_query`      |
//! | backend rejected the query       | 400    | `query`          |
//! | any other backend failure        | 500    | `internal_error` |

use crate::backends::SelectError;
use crate::query::NormalizeError;
use crate::results::ReplyError;
use crate::search::SearchError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

/// Any failure of a search request
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Backend(#[from] SelectError),

    #[error(transparent)]
    Query(#[from] NormalizeError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl ApiError {
    /// HTTP status of the reply
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Backend(SelectError::NotFound(_)) => StatusCode::BAD_REQUEST,
            Self::Backend(SelectError::NoBackends) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Query(_) => StatusCode::BAD_REQUEST,
            Self::Search(e) if e.is_user_error() => StatusCode::BAD_REQUEST,
            Self::Search(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Backend(SelectError::NotFound(_)) => "bad_backend",
            Self::Query(_) => "bad_query",
            Self::Search(e) if e.is_user_error() => "query",
            Self::Backend(SelectError::NoBackends) | Self::Search(_) => "internal_error",
        }
    }

    /// Human-readable message; server errors expose only the backend's description
    pub fn message(&self) -> String {
        match self {
            Self::Search(SearchError::InvalidQuery(desc)) => desc.clone(),
            Self::Search(SearchError::Backend(status)) => {
                format!("Talking to backend: {}", status.message)
            }
            Self::Search(e @ SearchError::Timeout(_)) => format!("Talking to backend: {}", e),
            Self::Backend(e) => e.to_string(),
            Self::Query(e) => e.to_string(),
        }
    }

    /// Wire form of this error
    pub fn reply(&self) -> ReplyError {
        ReplyError::new(self.code(), self.message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reply = self.reply();

        if status.is_server_error() {
            error!(status = status.as_u16(), code = %reply.error.code, message = %reply.error.message, "error");
        } else {
            warn!(status = status.as_u16(), code = %reply.error.code, message = %reply.error.message, "error");
        }

        (status, Json(reply)).into_response()
    }
}
