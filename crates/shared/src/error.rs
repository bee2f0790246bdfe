//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// A record violates a field constraint.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Two duplicate records cannot be merged.
    #[error("Merge conflict: {0}")]
    MergeConflict(String),

    /// Report content could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reading or writing a report failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MergeConflict(_) => "MERGE_CONFLICT",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the process exit code for this error (sysexits.h values).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::MergeConflict(_) | Self::Parse(_) => 65,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
            Self::Internal(_) => 70,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
