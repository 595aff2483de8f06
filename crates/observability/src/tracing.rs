//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Output format for the process-wide subscriber.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, with timestamps.
    #[default]
    Json,
    /// Single-line human-readable output.
    Compact,
}

/// Initialize tracing/logging for the process in the given format.
///
/// Returns `true` when this call installed the subscriber and `false` when a
/// global subscriber was already set (the call is then a no-op).
pub fn init_with(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    let installed = installed.is_ok();
    if installed {
        ::tracing::debug!(?format, "tracing subscriber installed");
    }
    installed
}
