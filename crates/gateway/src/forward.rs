//! Outbound call to a routed backend.
//!
//! Owns transport details only: the timeout-bounded client, header hygiene,
//! and the mapping of transport failures into the downstream taxonomy row. A
//! completed backend response is relayed unchanged — the backend's envelope
//! stays authoritative.

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::header::{HeaderMap, HeaderName};
use axum::http::{Method, Response};
use reqwest::Client;

use gatehouse_core::ServiceError;

use crate::route::RouteEntry;

/// Headers that describe one hop, never forwarded in either direction.
const HOP_BY_HOP: [HeaderName; 4] = [
    HeaderName::from_static("connection"),
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("transfer-encoding"),
    HeaderName::from_static("upgrade"),
];

/// Forwards requests to backend origins with a bounded timeout.
pub struct Forwarder {
    client: Client,
}

impl Forwarder {
    /// Build a forwarder whose outbound calls abort after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Send the rewritten request to the entry's target and relay the
    /// backend's response as-is. Transport failures become
    /// [`ServiceError::Downstream`]; the forwarder never retries.
    pub async fn forward(
        &self,
        entry: &RouteEntry,
        path_and_query: &str,
        method: Method,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Response<Body>, ServiceError> {
        let url = format!("{}{}", entry.target(), path_and_query);

        let mut outbound = HeaderMap::new();
        for (name, value) in headers {
            // Host and content-length are re-derived for the new connection.
            if *name == axum::http::header::HOST
                || *name == axum::http::header::CONTENT_LENGTH
                || HOP_BY_HOP.contains(name)
            {
                continue;
            }
            outbound.append(name, value.clone());
        }

        let backend = self
            .client
            .request(method, &url)
            .headers(outbound)
            .body(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = backend.status();
        let mut relay = Response::builder().status(status);
        if let Some(relay_headers) = relay.headers_mut() {
            for (name, value) in backend.headers() {
                if *name == axum::http::header::CONTENT_LENGTH || HOP_BY_HOP.contains(name) {
                    continue;
                }
                relay_headers.append(name, value.clone());
            }
        }

        let bytes = backend.bytes().await.map_err(|_| ServiceError::Downstream {
            status: Some(status.as_u16()),
            body: None,
        })?;

        relay
            .body(Body::from(bytes))
            .map_err(|e| ServiceError::unexpected(format!("failed to assemble relay response: {e}")))
    }
}

/// An outbound call that died before the backend answered carries no status
/// or body; translation reports it under the gateway's own rules.
fn map_transport_error(error: reqwest::Error) -> ServiceError {
    ServiceError::Downstream {
        status: error.status().map(|s| s.as_u16()),
        body: None,
    }
}
