// Logging initialization: diagnostics go to standard error through
// `tracing-subscriber` so they never mix with the result line on standard
// output. The filter comes from `TINYURL_LOG` (an `EnvFilter` directive such
// as `debug` or `tinyurl_cli=trace`) and defaults to `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TINYURL_LOG";
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Build the filter from the environment, falling back to the default.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init();
}
