//! Logging setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `tracing` subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise `--verbose` enables every trace line
/// emitted by the archiver and the default shows warnings only.
pub fn init(verbose: bool) {
    let default = if verbose { "dirzip=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
