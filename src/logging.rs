//! Tracing setup for hosts that want log output.
//!
//! The library itself only emits `tracing` events. A subscriber is installed
//! on request, writing to stderr so printed code on stdout stays clean.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "AUTO_IMPORT_LOG";

/// Filter from `AUTO_IMPORT_LOG`, then `RUST_LOG`, then the `debug` flag.
pub fn build_filter(debug: bool) -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_ENV) {
        return EnvFilter::builder().parse_lossy(val);
    }
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    let level = if debug { "debug" } else { "warn" };
    EnvFilter::new(format!("auto_import_native={}", level))
}

/// Installs the global stderr subscriber once. Later calls, or a subscriber
/// installed by the host, leave the existing one in place.
pub fn init_tracing(debug: bool) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(build_filter(debug))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
