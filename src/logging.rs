use tracing_subscriber::EnvFilter;

/// Env var holding the log filter, e.g. `NAME_PAIRS_LOG=debug`.
pub const LOG_ENV: &str = "NAME_PAIRS_LOG";

/// Install the stderr subscriber. Stdout is reserved for exported data.
///
/// Defaults to `info` when the filter is unset or invalid.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
