//! Tracing/logging setup shared by hosts of the friendship-graph crates.

/// Initialize process-wide tracing with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let _ = tracing::init_with(tracing::LogFormat::Json);
}

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use self::tracing::{LogFormat, init_with};
