//! Gateway HTTP application: catch-all dispatch through the route table.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::Extension;
use axum::http::header::HeaderMap;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use gatehouse_core::ServiceError;

use crate::forward::Forwarder;
use crate::route::RouteTable;

/// Immutable gateway state: the validated table and the outbound client.
pub struct GatewayState {
    pub table: RouteTable,
    pub forwarder: Forwarder,
}

/// Build the gateway router. Every path except `/health` goes through route
/// selection; unmatched paths get the not-found translation rather than a
/// bare 404.
pub fn build_app(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(dispatch)
        .layer(Extension(state))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// One request in flight at a time per call: select, rewrite, forward, relay.
async fn dispatch(
    Extension(state): Extension<Arc<GatewayState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path();
    let Some((entry, matched)) = state.table.select(path) else {
        return ServiceError::not_found(method.as_str(), path).into_response();
    };

    let mut forwarded = entry.rewrite_path(&matched);
    if let Some(query) = uri.query() {
        forwarded.push('?');
        forwarded.push_str(query);
    }

    tracing::debug!(route = entry.id(), %forwarded, "forwarding request");

    match state
        .forwarder
        .forward(entry, &forwarded, method, &headers, body)
        .await
    {
        Ok(relay) => relay.into_response(),
        Err(failure) => failure.into_response(),
    }
}
