//! Error types for applist.
//!
//! The error taxonomy mirrors how failures are handled at run level:
//! - `Provider` errors are recovered locally by the collectors (the
//!   affected fields become null) and never abort a run on their own.
//! - `Config`, `Collection`, `Emit`, and `Io` errors are fatal: the
//!   document either cannot be assembled or cannot be written.

use thiserror::Error;

/// Result type alias for applist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping and exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration or manifest errors.
    Config,
    /// Inventory collection errors (device block, index listing).
    Collection,
    /// Per-package collaborator call failures (recoverable).
    Provider,
    /// Document writing errors.
    Io,
    /// Platform compatibility errors.
    Platform,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Collection => write!(f, "collection"),
            ErrorCategory::Provider => write!(f, "provider"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Platform => write!(f, "platform"),
        }
    }
}

/// Unified error type for applist.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("collection failed: {0}")]
    Collection(String),

    #[error("provider call failed: {0}")]
    Provider(String),

    #[error("malformed document: {0}")]
    Emit(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

impl Error {
    /// Returns the error category for grouping and exit-code mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) => ErrorCategory::Config,
            Error::Collection(_) => ErrorCategory::Collection,
            Error::Provider(_) => ErrorCategory::Provider,
            Error::Emit(_) | Error::Io(_) => ErrorCategory::Io,
            Error::UnsupportedPlatform(_) => ErrorCategory::Platform,
        }
    }

    /// Whether the collectors may absorb this error and continue.
    ///
    /// Only provider-call failures are recoverable; everything else aborts
    /// the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Provider(_))
    }
}
