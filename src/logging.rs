//! Diagnostic logging setup
//!
//! Logs go to stderr so command output on stdout stays clean for piping.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber; `RUST_LOG` overrides the default level
pub fn init(verbose: bool) {
    let default_level = if verbose { "pettyflow=debug" } else { "pettyflow=warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    // A second call (tests running several commands in-process) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
