use std::sync::Arc;
use std::time::Duration;

use gatehouse_gateway::{app, Forwarder, RouteEntry, RouteTable};

const DEFAULT_FORWARD_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() {
    gatehouse_observability::init("gateway");

    let addr = std::env::var("GATEWAY_ADDR").unwrap_or_else(|_| {
        tracing::info!("GATEWAY_ADDR not set; using 0.0.0.0:8080");
        "0.0.0.0:8080".to_string()
    });
    let user_service_origin = std::env::var("USER_SERVICE_ORIGIN").unwrap_or_else(|_| {
        tracing::info!("USER_SERVICE_ORIGIN not set; using http://localhost:8081");
        "http://localhost:8081".to_string()
    });
    let timeout_secs = std::env::var("FORWARD_TIMEOUT_SECS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_FORWARD_TIMEOUT_SECS);

    // One route entry per backend module.
    let user_service = RouteEntry::new(
        "user_service",
        "/user/v1/{operation}/**",
        "/user/v1/{operation}",
        &user_service_origin,
    )
    .expect("user service route is valid");
    let table = RouteTable::new(vec![user_service]).expect("route table is unambiguous");

    let forwarder = Forwarder::new(Duration::from_secs(timeout_secs))
        .expect("failed to build outbound client");

    let state = Arc::new(app::GatewayState { table, forwarder });
    let router = app::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, router).await.unwrap();
}
