//! Tracing setup shared by binaries and examples.

/// Initializes the tracing subscriber for the whole process.
///
/// Verbosity is controlled through the `RUST_LOG` environment variable:
///
/// - `RUST_LOG=info` - lifecycle events and admissions
/// - `RUST_LOG=debug` - every message an actor processes
/// - `RUST_LOG=turnstile=debug` - debug for one crate only
///
/// Call once, early in `main`. Calling twice panics inside
/// `tracing-subscriber`, so tests should rely on their own capture instead.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
