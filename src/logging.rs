//! Tracing setup.
//!
//! Engine events go to stderr through `tracing-subscriber`. Stdout is kept for
//! command output and the MCP transport.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `trcat=trace`.
pub const LOG_ENV: &str = "TRCAT_LOG";

static INIT_ONCE: Once = Once::new();

/// Filter used when `TRCAT_LOG` is unset or invalid.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "trcat=debug" } else { "trcat=warn" }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
