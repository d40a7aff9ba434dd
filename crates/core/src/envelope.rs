//! Uniform response envelope.
//!
//! Every endpoint in the system answers with this shape, success or failure.
//! Absent members are omitted from the wire rather than emitted as null, and
//! `status` always precedes `error`/`data` for streaming consumers.

use serde::Serialize;

use crate::status::Status;

/// Structured error block carried by failure envelopes.
///
/// `errors` is never empty: the translator guarantees at least one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpError {
    /// HTTP status code reported in the body, mirroring the response status.
    code: u16,
    /// Individual error messages, one per failure (e.g. per invalid field).
    errors: Vec<String>,
}

impl HttpError {
    pub fn new(code: u16, errors: Vec<String>) -> Self {
        Self { code, errors }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Wrapper for API responses: exactly one of `data`/`error` is present.
///
/// Construct via [`ResponseWrapper::success`] or [`ResponseWrapper::failure`];
/// there is no way to populate both sides.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseWrapper<T> {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<HttpError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> ResponseWrapper<T> {
    /// Envelope for a successful operation.
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            error: None,
            data: Some(data),
        }
    }

    /// Envelope for a failed operation.
    pub fn failure(status: Status, error: HttpError) -> Self {
        Self {
            status,
            error: Some(error),
            data: None,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error(&self) -> Option<&HttpError> {
        self.error.as_ref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}
