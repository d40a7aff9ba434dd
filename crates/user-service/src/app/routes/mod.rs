use axum::routing::get;
use axum::Router;

pub mod system;
pub mod users;

/// Router for all user-module endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/user/v1", users::router())
}
