//! Exit codes for the applist CLI.
//!
//! The document on stdout is the product; the exit code is the only other
//! externally observable outcome. Codes are stable:
//! - 0: document emitted and flushed
//! - 10-19: user/environment errors
//! - 20-29: collection/IO failures
//! - 70+: platform errors

use al_common::Error;

/// Exit codes for applist runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Document emitted and flushed.
    Done = 0,

    /// Invalid configuration or manifest.
    ConfigError = 10,

    /// Device or index collection failed; no document.
    CollectionError = 20,

    /// Failed to write the document to the sink.
    IoError = 21,

    /// Unsupported platform.
    UnsupportedPlatform = 70,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Done)
    }

    /// Stable name for log output.
    pub fn code_name(self) -> &'static str {
        match self {
            ExitCode::Done => "OK_DONE",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::CollectionError => "ERR_COLLECTION",
            ExitCode::IoError => "ERR_IO",
            ExitCode::UnsupportedPlatform => "ERR_PLATFORM",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config(_) => ExitCode::ConfigError,
            Error::Collection(_) | Error::Provider(_) => ExitCode::CollectionError,
            Error::Emit(_) | Error::Io(_) => ExitCode::IoError,
            Error::UnsupportedPlatform(_) => ExitCode::UnsupportedPlatform,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_is_zero() {
        assert_eq!(ExitCode::Done.as_i32(), 0);
        assert!(ExitCode::Done.is_success());
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            ExitCode::from(&Error::Config("x".into())),
            ExitCode::ConfigError
        );
        assert_eq!(
            ExitCode::from(&Error::Collection("x".into())),
            ExitCode::CollectionError
        );
        assert_eq!(
            ExitCode::from(&Error::Io(std::io::Error::other("x"))),
            ExitCode::IoError
        );
        assert_eq!(
            ExitCode::from(&Error::Emit("x".into())),
            ExitCode::IoError
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::Done.to_string(), "OK_DONE (0)");
        assert_eq!(ExitCode::IoError.to_string(), "ERR_IO (21)");
    }
}
