//! HTTP routes.
//!
//! | Endpoint       | Method | Description                      |
//! |----------------|--------|----------------------------------|
//! | `/healthcheck` | GET    | Liveness probe                   |
//! | `/*uri`        | GET    | Resolve the content page at uri  |

use std::sync::Arc;

use axum::extract::{Extension, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use tracing::{error, warn};

use content_resolver_core::Resolver;
use content_resolver_gateway::HttpGateway;
use content_resolver_shared::{EngineConfig, ResolverError};

use crate::request_id::{self, RequestId};

/// Shared state for the resolver routes.
#[derive(Clone)]
pub(crate) struct AppState {
    pub gateway: HttpGateway,
    pub engine: EngineConfig,
}

/// Body returned when a page cannot be resolved.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/", get(resolve_page))
        .route("/*uri", get(resolve_page))
        .layer(middleware::from_fn(request_id::assign))
        .with_state(state)
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn resolve_page(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    uri: Uri,
) -> Response {
    // Backends take the decoded content path.
    let path = match percent_decode_str(uri.path()).decode_utf8() {
        Ok(path) => path.into_owned(),
        Err(e) => {
            warn!(path = uri.path(), error = %e, "request path is not valid UTF-8");
            let body = ErrorResponse {
                error: format!("invalid path encoding: {e}"),
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };
    let gateway = Arc::new(state.gateway.with_request_id(&request_id));
    let resolver = Resolver::new(gateway, state.engine.clone());

    match resolver.resolve(&path).await {
        Ok(aggregation) => {
            for failure in &aggregation.errors {
                warn!(
                    path = %path,
                    kind = failure.kind(),
                    error = %failure,
                    "page resolved with missing parts"
                );
            }
            Json(aggregation.page).into_response()
        }
        Err(e) => {
            error!(path = %path, error = %e, "failed to resolve page");
            let status = status_for(&e);
            (status, Json(ErrorResponse { error: e.to_string() })).into_response()
        }
    }
}

/// HTTP status reported for a failed root resolution.
fn status_for(err: &ResolverError) -> StatusCode {
    match err {
        ResolverError::UnsupportedPageType { .. } => StatusCode::NOT_FOUND,
        ResolverError::UnexpectedStatus { status: 404, .. } => StatusCode::NOT_FOUND,
        e if e.is_upstream() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
