//! Error types for dialog launching and result decoding

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code zenity uses when `--timeout` expires before the user answers.
pub const TIMEOUT_EXIT_CODE: i32 = 5;

/// Error types organized by layer
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    // ─────────────────────────────────────────────────────────────
    // Process Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to launch '{binary}': {reason}")]
    Launch { binary: PathBuf, reason: String },

    #[error("Dialog process already exited; cannot write to its input")]
    BrokenPipe,

    #[error("Dialog exited with {}: {stderr}", describe_code(*.code))]
    Execution { code: Option<i32>, stderr: String },

    #[error("Dialog protocol error: {message}")]
    Protocol { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(TIMEOUT_EXIT_CODE) => format!("code {} (timeout)", TIMEOUT_EXIT_CODE),
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn launch(binary: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Launch {
            binary: binary.into(),
            reason: reason.into(),
        }
    }

    pub fn execution(code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::Execution {
            code,
            stderr: stderr.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the dialog closed itself because its `--timeout` expired
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Execution {
                code: Some(TIMEOUT_EXIT_CODE),
                ..
            }
        )
    }

    /// Check if this is a recoverable error
    ///
    /// A failed dialog does not poison the launcher; the caller may show
    /// another one.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::BrokenPipe | Error::Execution { .. } | Error::Protocol { .. }
        )
    }

    /// Check if this error means no dialog can be shown at all
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Launch { .. } | Error::Config { .. } | Error::ConfigNotFound { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Log the error with context before propagating it
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
