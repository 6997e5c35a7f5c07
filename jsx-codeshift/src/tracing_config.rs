//! Tracing setup for the `decaf-transform` binary.
//!
//! The filter is read from `DECAF_LOG`, falling back to `RUST_LOG`, and
//! defaults to `info` so the per-step summary is always visible:
//!
//! ```bash
//! # Per-pass rewrite counts for every file
//! DECAF_LOG=jsx_codeshift=debug decaf-transform -t --path src/
//! ```

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Build an `EnvFilter` from `DECAF_LOG`, then `RUST_LOG`, then the default.
fn build_filter() -> EnvFilter {
    let directives = std::env::var("DECAF_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    EnvFilter::builder().parse_lossy(directives)
}

/// Initialise the global tracing subscriber. Output goes to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
