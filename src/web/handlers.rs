//! HTTP request handlers

use super::error::ApiError;
use super::request_id::RequestId;
use super::state::AppState;
use crate::metrics::record_search;
use crate::query::{normalize, RawParams};
use crate::results::SearchReply;
use crate::search::RequestContext;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use tracing::info;

/// Search on the default backend
pub async fn search(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<SearchReply>, ApiError> {
    run_search(&state, None, context(request_id), RawParams::new(params)).await
}

/// Search on a named backend
pub async fn search_backend(
    State(state): State<AppState>,
    Path(backend): Path<String>,
    request_id: Option<Extension<RequestId>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<SearchReply>, ApiError> {
    run_search(
        &state,
        Some(&backend),
        context(request_id),
        RawParams::new(params),
    )
    .await
}

fn context(request_id: Option<Extension<RequestId>>) -> RequestContext {
    RequestContext::new(request_id.map(|Extension(RequestId(id))| id))
}

async fn run_search(
    state: &AppState,
    backend_name: Option<&str>,
    ctx: RequestContext,
    params: RawParams,
) -> Result<Json<SearchReply>, ApiError> {
    let backend = state.search.select(backend_name)?;

    let normalized = normalize(&params)?;
    let query = normalized
        .query
        .with_default_max_matches(state.settings.search.default_max_matches);

    let reply = state.search.dispatch(&ctx, backend, &query).await?;

    if let Some(ref metrics) = state.metrics {
        record_search(metrics.as_ref(), &reply.info);
    }

    info!(
        request_id = ?ctx.request_id,
        backend = %backend.id,
        results = reply.results.len(),
        why = %reply.info.exit_reason,
        stats = ?reply.info,
        "responding success"
    );

    Ok(Json(reply))
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "backends": state.search.registry().ids(),
    }))
}
