//! Tracing/logging initialization shared by the service binaries.

mod tracing_init;

pub use tracing_init::init;
