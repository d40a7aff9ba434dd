//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: collaborator construction (store, clock, use case)
//! - `routes/`: HTTP routes + handlers
//! Unmatched paths fall through to the not-found translation so every
//! response, including 404s, carries the standard envelope.

use std::sync::Arc;

use axum::http::Uri;
use axum::response::Response;
use axum::{Extension, Router};
use tower::ServiceBuilder;

use gatehouse_core::ServiceError;

pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    routes::router()
        .fallback(no_handler)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}

async fn no_handler(method: axum::http::Method, uri: Uri) -> Response {
    use axum::response::IntoResponse;

    ServiceError::not_found(method.as_str(), uri.path()).into_response()
}
