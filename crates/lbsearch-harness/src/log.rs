//! Subscriber setup for harness binaries.
//!
//! Libraries only emit `tracing` events; installing a subscriber is left to
//! the binary. The filter comes from `RUST_LOG` and defaults to `info`.

use tracing_subscriber::EnvFilter;

/// Default directive when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber, writing to stderr.
///
/// Returns `false` when a subscriber was already installed (for example by a
/// test runner), which is not an error.
pub fn init_tracing(json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
