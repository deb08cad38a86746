//! Telemetry initialization.
//!
//! Controlled by `RUST_LOG`: unset means `warn` and above. Diagnostics go to
//! stderr so they never mix with flattened output on stdout.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for the binary.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
