//! Diagnostic logging setup
//!
//! Operator-facing lines go through [crate::ui]; `tracing` events carry the
//! detail (git refspecs, API URLs) at `debug`, shown with `--verbose`.

use tracing_subscriber::filter::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "release_tagger=debug,info"
    } else {
        "info"
    }
}

/// Install the global subscriber, writing to stderr without timestamps.
///
/// `RUST_LOG` takes precedence over `verbose`. Calling this twice is harmless;
/// the second installation is ignored.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
