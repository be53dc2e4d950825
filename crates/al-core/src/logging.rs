//! Logging setup.
//!
//! stdout is reserved for the document; all log output goes to stderr.
//! The filter resolves from `APPLIST_LOG`, then `RUST_LOG`, then the
//! verbosity flags. Success at the default level is silent apart from the
//! document itself.

use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "APPLIST_LOG";

/// Initialize the logging subsystem. Call once at startup.
pub fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            EnvFilter::new(format!("al_core={default_level},al_common={default_level}"))
        });

    // try_init: harmless if a subscriber is already set (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
