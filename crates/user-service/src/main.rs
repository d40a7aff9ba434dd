use std::sync::Arc;

#[tokio::main]
async fn main() {
    gatehouse_observability::init("user-service");

    let addr = std::env::var("USER_SERVICE_ADDR").unwrap_or_else(|_| {
        tracing::info!("USER_SERVICE_ADDR not set; using 0.0.0.0:8081");
        "0.0.0.0:8081".to_string()
    });

    let services = Arc::new(gatehouse_user_service::app::services::build_services());
    let app = gatehouse_user_service::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
