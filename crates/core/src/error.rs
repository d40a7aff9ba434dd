//! Service failure taxonomy.
//!
//! Closed set of failure kinds surfaced to the HTTP boundary. Every failure a
//! handler can produce is one of these variants; [`crate::translate`] maps
//! each to an envelope and HTTP status. Keep carried detail for `Unexpected`
//! and `DataIntegrity` out of responses — it is for logs only.

use thiserror::Error;

/// Result type used by business operations and the gateway.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// A classified failure, one variant per translation row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Anything not matched by a more specific variant. The detail is logged,
    /// never returned to the caller.
    #[error("{0}")]
    Unexpected(String),

    /// Persistence/integrity conflict in the backing store.
    #[error("{0}")]
    DataIntegrity(String),

    /// Domain failure whose message is safe to return.
    #[error("{0}")]
    Operation(String),

    /// Uniqueness violation: the entity is already registered.
    #[error("User already register!")]
    AlreadyRegistered,

    /// An outbound call to a backing service failed.
    ///
    /// `status`/`body` are present when the backend answered before the
    /// failure; both absent means the call died in transport.
    #[error("backend call failed")]
    Downstream {
        status: Option<u16>,
        body: Option<String>,
    },

    /// Malformed caller input (type or shape violation).
    #[error("{0}")]
    BadArgument(String),

    /// Field-level validation failures, one message per invalid field.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// No route or handler matched the request.
    #[error("No handler found for {method} {path}")]
    NotFound { method: String, path: String },
}

impl ServiceError {
    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected(detail.into())
    }

    pub fn data_integrity(detail: impl Into<String>) -> Self {
        Self::DataIntegrity(detail.into())
    }

    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation(message.into())
    }

    pub fn bad_argument(message: impl Into<String>) -> Self {
        Self::BadArgument(message.into())
    }

    pub fn not_found(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::NotFound {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Short name used in the translator's log line.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unexpected(_) => "Unexpected",
            Self::DataIntegrity(_) => "DataIntegrity",
            Self::Operation(_) => "Operation",
            Self::AlreadyRegistered => "AlreadyRegistered",
            Self::Downstream { .. } => "Downstream",
            Self::BadArgument(_) => "BadArgument",
            Self::Validation(_) => "Validation",
            Self::NotFound { .. } => "NotFound",
        }
    }
}
