//! Axum integration for the envelope contract.
//!
//! Handlers return `Result<_, ServiceError>` style flows and convert here;
//! this is the single place a failure crosses into HTTP.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::envelope::ResponseWrapper;
use crate::error::ServiceError;
use crate::translate::translate;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (code, envelope) = translate(&self);
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(envelope)).into_response()
    }
}

/// 201 response with a success envelope around the created resource.
pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(ResponseWrapper::success(data))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_response_carries_translated_status() {
        let response = ServiceError::AlreadyRegistered.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn created_response_is_201() {
        let response = created(serde_json::json!({"id": 1}));
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
