//! Environment-driven configuration.
//!
//! The document contract takes no command-line arguments, so everything
//! that varies between hosts resolves from the environment, with built-in
//! defaults (resolution order: env > defaults):
//!
//! - `APPLIST_INDEX` — path to the package-index manifest; unset means an
//!   empty index.
//! - `APPLIST_MAX_DEPTH` — walker depth cap; invalid values fall back to
//!   the default with a warning.
//! - `APPLIST_SCRATCH_DIR` — scratch directory checked by self-cleanup.
//! - `APPLIST_LOG` / `RUST_LOG` — log filter (see `logging`).

use crate::walk::DEFAULT_MAX_DEPTH;
use std::path::PathBuf;
use tracing::warn;

pub const ENV_INDEX: &str = "APPLIST_INDEX";
pub const ENV_MAX_DEPTH: &str = "APPLIST_MAX_DEPTH";
pub const ENV_SCRATCH_DIR: &str = "APPLIST_SCRATCH_DIR";

/// Default scratch location the binary deletes itself from.
pub const DEFAULT_SCRATCH_DIR: &str = "/data/local/tmp";

#[derive(Debug, Clone)]
pub struct Config {
    /// Manifest path; `None` means an empty package index.
    pub index_path: Option<PathBuf>,
    /// Walker depth cap.
    pub max_depth: usize,
    /// Scratch directory for self-cleanup.
    pub scratch_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            index_path: None,
            max_depth: DEFAULT_MAX_DEPTH,
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
        }
    }
}

impl Config {
    /// Resolve configuration from the environment.
    pub fn from_env() -> Self {
        let index_path = std::env::var_os(ENV_INDEX).map(PathBuf::from);
        let max_depth = parse_max_depth(std::env::var(ENV_MAX_DEPTH).ok());
        let scratch_dir = std::env::var_os(ENV_SCRATCH_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRATCH_DIR));
        Config {
            index_path,
            max_depth,
            scratch_dir,
        }
    }
}

fn parse_max_depth(raw: Option<String>) -> usize {
    match raw {
        None => DEFAULT_MAX_DEPTH,
        Some(text) => match text.trim().parse::<usize>() {
            Ok(depth) if depth > 0 => depth,
            _ => {
                warn!(
                    value = %text,
                    default = DEFAULT_MAX_DEPTH,
                    "invalid {ENV_MAX_DEPTH}, using default"
                );
                DEFAULT_MAX_DEPTH
            }
        },
    }
}
