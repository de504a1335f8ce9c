//! Process-wide tracing setup shared by the binaries and tests.

/// Subscriber configuration (filter, output format).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize tracing with the format chosen by `LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    self::tracing::init(LogFormat::from_env());
}
