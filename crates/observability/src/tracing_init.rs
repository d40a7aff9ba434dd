//! Process-wide tracing setup.

use tracing_subscriber::EnvFilter;

/// Initialize JSON logging for the named service.
///
/// Filtering is driven by `RUST_LOG` with an `info` default. Safe to call
/// multiple times (subsequent calls are no-ops), so test binaries can share
/// it with the services.
pub fn init(service: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(service, "logging initialized");
    }
}
