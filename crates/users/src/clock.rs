//! Timestamp collaborator.

use chrono::Local;

/// Source of formatted creation timestamps.
pub trait Clock: Send + Sync {
    /// Current time as an ISO-8601 string with UTC offset.
    fn now(&self) -> String;
}

/// Wall-clock implementation using the local offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Local::now().to_rfc3339()
    }
}
