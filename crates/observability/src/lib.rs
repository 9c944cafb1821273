//! Tracing/logging setup shared by every binary.

pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide logging with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    self::tracing::init(LogFormat::Json);
}

/// Initialize process-wide logging with an explicit output format.
pub fn init_with(format: LogFormat) {
    self::tracing::init(format);
}
