//! Operation outcome status reported in every envelope.

use serde::Serialize;

/// Outcome of an operation as seen by the caller.
///
/// `Fail` is a known, classified failure; `Error` is an unexpected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Fail,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Status::Success).unwrap(), "\"SUCCESS\"");
        assert_eq!(serde_json::to_string(&Status::Fail).unwrap(), "\"FAIL\"");
        assert_eq!(serde_json::to_string(&Status::Error).unwrap(), "\"ERROR\"");
    }
}
