//! Process-wide logging setup shared by the Ferremas binaries.

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Subscriber configuration (filter, output format).
pub mod tracing;
