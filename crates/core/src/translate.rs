//! Failure-to-envelope translation.
//!
//! Invoked exactly once per failed request, at the boundary between the
//! business operation (or router) and the HTTP layer. Pure with respect to
//! the mapping table: the same classified failure always yields the same
//! envelope shape.

use tracing::error;

use crate::envelope::{HttpError, ResponseWrapper};
use crate::error::ServiceError;
use crate::status::Status;

const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again later.";
const DATA_INTEGRITY_MESSAGE: &str =
    "Data integrity violation. Please ensure all required fields are filled correctly.";
const UNKNOWN_DOWNSTREAM_MESSAGE: &str = "Unknown error occurred";
const VALIDATION_FALLBACK_MESSAGE: &str = "Validation failed";

/// HTTP status used when a downstream call failed before the backend answered.
const BAD_GATEWAY: u16 = 502;

/// Translate a classified failure into an HTTP status code and an error
/// envelope. Logs the failure (kind and message) exactly once.
pub fn translate(failure: &ServiceError) -> (u16, ResponseWrapper<()>) {
    error!("{}--> {}", failure.kind(), failure);

    let (status, code, errors) = match failure {
        ServiceError::Unexpected(_) => {
            (Status::Error, 500, vec![UNEXPECTED_MESSAGE.to_string()])
        }
        ServiceError::DataIntegrity(_) => {
            (Status::Error, 500, vec![DATA_INTEGRITY_MESSAGE.to_string()])
        }
        ServiceError::Operation(message) => (Status::Fail, 404, vec![message.clone()]),
        ServiceError::AlreadyRegistered => {
            (Status::Fail, 409, vec![failure.to_string()])
        }
        ServiceError::Downstream { status, body } => (
            Status::Fail,
            status.unwrap_or(BAD_GATEWAY),
            vec![downstream_message(body.as_deref())],
        ),
        ServiceError::BadArgument(message) => (Status::Fail, 400, vec![message.clone()]),
        ServiceError::Validation(messages) => {
            (Status::Fail, 400, non_blank_or_fallback(messages))
        }
        ServiceError::NotFound { .. } => (Status::Fail, 404, vec![failure.to_string()]),
    };

    let envelope = ResponseWrapper::failure(status, HttpError::new(code, errors));
    (code, envelope)
}

/// Extract the message from a backend error body.
///
/// Reads the body's `error.message` field; a parseable body without one
/// yields a fixed message, an unparseable body reports the parse failure.
fn downstream_message(body: Option<&str>) -> String {
    let Some(body) = body else {
        return UNKNOWN_DOWNSTREAM_MESSAGE.to_string();
    };
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(root) => root
            .pointer("/error/message")
            .and_then(|node| node.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_DOWNSTREAM_MESSAGE.to_string()),
        Err(e) => format!("Error parsing error message: {e}"),
    }
}

/// Drop blank validation messages; the list surfaced to the caller must still
/// be non-empty, so an all-blank input falls back to a fixed message.
fn non_blank_or_fallback(messages: &[String]) -> Vec<String> {
    let filtered: Vec<String> = messages
        .iter()
        .filter(|m| !m.trim().is_empty())
        .cloned()
        .collect();
    if filtered.is_empty() {
        vec![VALIDATION_FALLBACK_MESSAGE.to_string()]
    } else {
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors_of(envelope: &ResponseWrapper<()>) -> Vec<String> {
        envelope.error().unwrap().errors().to_vec()
    }

    #[test]
    fn unexpected_fault_is_500_error_with_generic_message() {
        let failure = ServiceError::unexpected("stack trace with /internal/path");
        let (code, envelope) = translate(&failure);
        assert_eq!(code, 500);
        assert_eq!(envelope.status(), Status::Error);
        assert_eq!(errors_of(&envelope), vec![UNEXPECTED_MESSAGE.to_string()]);
        // Internal detail never leaks into the response.
        let text = serde_json::to_string(&envelope).unwrap();
        assert!(!text.contains("/internal/path"));
    }

    #[test]
    fn data_integrity_is_500_error_with_fixed_message() {
        let (code, envelope) = translate(&ServiceError::data_integrity("unique index violated"));
        assert_eq!(code, 500);
        assert_eq!(envelope.status(), Status::Error);
        assert_eq!(errors_of(&envelope), vec![DATA_INTEGRITY_MESSAGE.to_string()]);
    }

    #[test]
    fn operation_failure_is_404_fail_with_its_message() {
        let (code, envelope) = translate(&ServiceError::operation("user vanished mid-flight"));
        assert_eq!(code, 404);
        assert_eq!(envelope.status(), Status::Fail);
        assert_eq!(errors_of(&envelope), vec!["user vanished mid-flight".to_string()]);
    }

    #[test]
    fn duplicate_entity_is_409_fail() {
        let (code, envelope) = translate(&ServiceError::AlreadyRegistered);
        assert_eq!(code, 409);
        assert_eq!(envelope.status(), Status::Fail);
        assert_eq!(errors_of(&envelope), vec!["User already register!".to_string()]);
    }

    #[test]
    fn downstream_failure_preserves_backend_status_and_message() {
        let failure = ServiceError::Downstream {
            status: Some(409),
            body: Some(r#"{"error":{"message":"already taken"}}"#.to_string()),
        };
        let (code, envelope) = translate(&failure);
        assert_eq!(code, 409);
        assert_eq!(envelope.status(), Status::Fail);
        assert_eq!(errors_of(&envelope), vec!["already taken".to_string()]);
    }

    #[test]
    fn downstream_body_without_message_field_uses_fixed_message() {
        let failure = ServiceError::Downstream {
            status: Some(404),
            body: Some(r#"{"status":"FAIL"}"#.to_string()),
        };
        let (code, envelope) = translate(&failure);
        assert_eq!(code, 404);
        assert_eq!(errors_of(&envelope), vec![UNKNOWN_DOWNSTREAM_MESSAGE.to_string()]);
    }

    #[test]
    fn unparseable_downstream_body_reports_the_parse_failure() {
        let failure = ServiceError::Downstream {
            status: Some(400),
            body: Some("<html>bad gateway</html>".to_string()),
        };
        let (code, envelope) = translate(&failure);
        assert_eq!(code, 400);
        let errors = errors_of(&envelope);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error parsing error message: "));
    }

    #[test]
    fn transport_level_downstream_failure_is_502() {
        let failure = ServiceError::Downstream {
            status: None,
            body: None,
        };
        let (code, envelope) = translate(&failure);
        assert_eq!(code, 502);
        assert_eq!(envelope.status(), Status::Fail);
        assert_eq!(errors_of(&envelope), vec![UNKNOWN_DOWNSTREAM_MESSAGE.to_string()]);
    }

    #[test]
    fn bad_argument_is_400_fail_with_its_message() {
        let (code, envelope) = translate(&ServiceError::bad_argument("expected a JSON object"));
        assert_eq!(code, 400);
        assert_eq!(envelope.status(), Status::Fail);
        assert_eq!(errors_of(&envelope), vec!["expected a JSON object".to_string()]);
    }

    #[test]
    fn validation_failures_aggregate_in_order() {
        let failure = ServiceError::Validation(vec![
            "Full name is require!".to_string(),
            "Gender is required".to_string(),
        ]);
        let (code, envelope) = translate(&failure);
        assert_eq!(code, 400);
        assert_eq!(
            errors_of(&envelope),
            vec!["Full name is require!".to_string(), "Gender is required".to_string()]
        );
    }

    #[test]
    fn blank_validation_messages_are_dropped() {
        let failure = ServiceError::Validation(vec![
            "  ".to_string(),
            "Gender is required".to_string(),
            String::new(),
        ]);
        let (_, envelope) = translate(&failure);
        assert_eq!(errors_of(&envelope), vec!["Gender is required".to_string()]);
    }

    #[test]
    fn all_blank_validation_messages_fall_back_to_non_empty_list() {
        let failure = ServiceError::Validation(vec!["".to_string(), "   ".to_string()]);
        let (code, envelope) = translate(&failure);
        assert_eq!(code, 400);
        assert_eq!(errors_of(&envelope), vec![VALIDATION_FALLBACK_MESSAGE.to_string()]);
    }

    #[test]
    fn unmatched_route_is_404_fail_describing_the_path() {
        let (code, envelope) = translate(&ServiceError::not_found("GET", "/user/v1/unknownOperation/x"));
        assert_eq!(code, 404);
        assert_eq!(envelope.status(), Status::Fail);
        assert_eq!(
            errors_of(&envelope),
            vec!["No handler found for GET /user/v1/unknownOperation/x".to_string()]
        );
    }

    #[test]
    fn translation_is_deterministic_for_the_same_failure() {
        let failure = ServiceError::AlreadyRegistered;
        let (code_a, env_a) = translate(&failure);
        let (code_b, env_b) = translate(&failure);
        assert_eq!(code_a, code_b);
        assert_eq!(
            serde_json::to_string(&env_a).unwrap(),
            serde_json::to_string(&env_b).unwrap()
        );
    }
}
