//! Error types for the login flow

use thiserror::Error;

use crate::validation::FieldErrors;

/// Result type alias for fallible setup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure errors (configuration loading and checking)
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Could not determine where configuration lives
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// User-facing failures surfaced by the flow.
///
/// These are values held in flow state and shown to the user, never
/// propagated with `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginFailure {
    /// Local field validation blocked the submission
    #[error("Please correct the highlighted fields")]
    Validation(FieldErrors),

    /// Wrong credentials or token; the user may retry
    #[error("{0}")]
    Authentication(String),

    /// Too many failed attempts; cleared only by an external reset
    #[error("{0}")]
    Lockout(String),

    /// The current token expired; a resend is required
    #[error("Token expired.")]
    Expiry,
}

impl LoginFailure {
    /// Whether the user can recover by simply trying again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Authentication(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display() {
        assert_eq!(LoginFailure::Expiry.to_string(), "Token expired.");
        assert_eq!(
            LoginFailure::Authentication("Invalid credentials".into()).to_string(),
            "Invalid credentials"
        );
        assert!(!LoginFailure::Lockout("locked".into()).is_retryable());
        assert!(LoginFailure::Authentication("nope".into()).is_retryable());
    }
}
