use std::io::{self, IsTerminal};
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that overrides the verbosity flags
pub const LOG_ENV: &str = "LOGLYZER_LOG";

/// Filter directive for a `-v` count when `LOGLYZER_LOG` is unset
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber; stdout stays reserved for the report
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (e.g. from tests) is harmless
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
