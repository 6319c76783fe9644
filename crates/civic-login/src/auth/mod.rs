//! Authenticators for the two sign-in factors
//!
//! Both factors sit behind async traits so the stubs can be swapped for a
//! real backend. Every outcome, including lockout, comes back as a value.

mod credentials;
mod token;

pub use credentials::StubCredentialAuthenticator;
pub use token::StubTokenAuthenticator;

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

/// One username/password submission
#[derive(Clone)]
pub struct CredentialAttempt {
    pub username: String,
    pub password: Zeroizing<String>,
}

impl CredentialAttempt {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for CredentialAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialAttempt")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome class of a password check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    /// Password accepted; the token step follows
    OkPassword,
    /// Too many failures; every check reports this until reset
    Locked,
    /// Wrong username or password
    Invalid,
}

/// Result of [`CredentialAuthenticator::authenticate`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub success: bool,
    pub message: String,
    pub status: AuthStatus,
}

impl AuthenticationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            status: AuthStatus::OkPassword,
        }
    }

    pub fn locked(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status: AuthStatus::Locked,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status: AuthStatus::Invalid,
        }
    }
}

/// Outcome class of a token check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
    Ok,
    Invalid,
    Expired,
}

/// Result of [`TokenAuthenticator::verify`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenVerificationResult {
    pub success: bool,
    pub message: String,
    pub status: TokenStatus,
}

impl TokenVerificationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            status: TokenStatus::Ok,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status: TokenStatus::Invalid,
        }
    }

    pub fn expired(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status: TokenStatus::Expired,
        }
    }
}

/// Result of [`TokenAuthenticator::resend`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResendResult {
    pub success: bool,
    pub message: String,
}

/// First factor: username and password
#[async_trait]
pub trait CredentialAuthenticator: Send + Sync {
    /// Check a credential pair
    async fn authenticate(&self, attempt: &CredentialAttempt) -> AuthenticationResult;
}

/// Second factor: six-digit one-time token
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Check a token issued to `username`
    async fn verify(&self, username: &str, token: &str) -> TokenVerificationResult;

    /// Invalidate the current token and issue a new one
    async fn resend(&self, username: &str) -> ResendResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_debug_redacts_password() {
        let attempt = CredentialAttempt::new("admin", "12345");
        let debug = format!("{:?}", attempt);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("12345"));
    }
}
