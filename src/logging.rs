// src/logging.rs
use tracing_subscriber::EnvFilter;

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "SMELLFIX_LOG";

/// Installs the global subscriber. Logs go to stderr so reports on stdout
/// stay clean.
///
/// `verbosity` picks the default level (0 = warn, 1 = info, 2+ = debug) when
/// neither `SMELLFIX_LOG` nor `RUST_LOG` is set. Calling it twice is a no-op.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "smellfix_core=warn",
        1 => "smellfix_core=info",
        _ => "smellfix_core=debug",
    }
}
