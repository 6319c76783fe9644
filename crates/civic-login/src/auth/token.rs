//! Placeholder one-time token check

use std::time::Duration;

use async_trait::async_trait;

use super::{ResendResult, TokenAuthenticator, TokenVerificationResult};
use crate::config::{DemoCredentials, LoginConfig};
use crate::session::SessionHandle;

/// Token check against a fixed code and a fixed "expired" sentinel
pub struct StubTokenAuthenticator {
    session: SessionHandle,
    demo: DemoCredentials,
    max_attempts: u32,
    verify_delay: Duration,
    resend_delay: Duration,
}

impl StubTokenAuthenticator {
    pub fn new(session: SessionHandle, config: &LoginConfig) -> Self {
        Self {
            session,
            demo: config.demo.clone(),
            max_attempts: config.max_token_attempts,
            verify_delay: config.token_delay(),
            resend_delay: config.resend_delay(),
        }
    }
}

#[async_trait]
impl TokenAuthenticator for StubTokenAuthenticator {
    async fn verify(&self, _username: &str, token: &str) -> TokenVerificationResult {
        tokio::time::sleep(self.verify_delay).await;

        let max_attempts = self.max_attempts;
        let is_expired_sentinel = token == self.demo.expired_token;
        let is_valid = token == self.demo.token;

        self.session
            .update(|session| {
                if session.is_token_locked(max_attempts) {
                    return TokenVerificationResult::invalid(
                        "Too many attempts. Please try again later.",
                    );
                }

                // The sentinel never counts as a failure
                if is_expired_sentinel {
                    return TokenVerificationResult::expired("Token expired.");
                }

                if is_valid {
                    session.is_authenticated = true;
                    session.failed_token_attempts = 0;
                    TokenVerificationResult::ok("Login successful!")
                } else {
                    session.failed_token_attempts += 1;
                    TokenVerificationResult::invalid("Invalid token. Please try again.")
                }
            })
            .await
    }

    async fn resend(&self, _username: &str) -> ResendResult {
        tokio::time::sleep(self.resend_delay).await;

        ResendResult {
            success: true,
            message: "Token resent successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenStatus;

    fn authenticator() -> (StubTokenAuthenticator, SessionHandle) {
        let session = SessionHandle::new();
        let auth = StubTokenAuthenticator::new(session.clone(), &LoginConfig::default());
        (auth, session)
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_sentinel_does_not_count() {
        let (auth, session) = authenticator();
        session.update(|s| s.failed_token_attempts = 2).await;

        for _ in 0..3 {
            let result = auth.verify("admin", "999999").await;
            assert_eq!(result.status, TokenStatus::Expired);
            assert_eq!(result.message, "Token expired.");
        }

        assert_eq!(session.snapshot().await.failed_token_attempts, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_correct_token_authenticates() {
        let (auth, session) = authenticator();
        session.update(|s| s.failed_token_attempts = 4).await;

        let result = auth.verify("admin", "123456").await;

        assert!(result.success);
        assert_eq!(result.status, TokenStatus::Ok);
        let snapshot = session.snapshot().await;
        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.failed_token_attempts, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_too_many_attempts() {
        let (auth, session) = authenticator();

        for _ in 0..5 {
            let result = auth.verify("admin", "000000").await;
            assert_eq!(result.status, TokenStatus::Invalid);
            assert_eq!(result.message, "Invalid token. Please try again.");
        }

        let result = auth.verify("admin", "123456").await;
        assert_eq!(result.status, TokenStatus::Invalid);
        assert_eq!(result.message, "Too many attempts. Please try again later.");
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resend_always_succeeds() {
        let (auth, _session) = authenticator();
        let result = auth.resend("admin").await;
        assert!(result.success);
        assert_eq!(result.message, "Token resent successfully");
    }
}
