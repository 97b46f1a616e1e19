//! Process-wide logging setup.

use env_logger::Env;

/// Initialize the global logger.
///
/// Respects `RUST_LOG`, defaulting to `info`. Log lines go to stderr so they
/// never mix with rendered output on stdout.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}
