use tracing_subscriber::EnvFilter;

/// Overrides the `-v` flags when set, e.g. `VERBUMP_LOG=verbump_manifest=debug`.
pub const LOG_ENV: &str = "VERBUMP_LOG";

pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Logs go to stderr, stdout only carries the confirmation line.
pub fn init(verbosity: u8) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .try_init();
}
