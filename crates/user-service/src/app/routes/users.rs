use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use gatehouse_core::{created, ServiceError};
use gatehouse_users::RegisterUserRequest;

use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/registerNewUser", post(register_new_user))
}

/// Handles the creation of a new user.
///
/// A body that fails to parse at all is a bad-argument failure; everything
/// past the parse goes through the registration operation and the translator.
pub async fn register_new_user(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return ServiceError::bad_argument(rejection.body_text()).into_response();
        }
    };

    match services.register_user.register(request) {
        Ok(user) => created(user),
        Err(failure) => failure.into_response(),
    }
}
