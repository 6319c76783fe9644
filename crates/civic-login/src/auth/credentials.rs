//! Placeholder password check with a lockout threshold

use std::time::Duration;

use async_trait::async_trait;

use super::{AuthenticationResult, CredentialAttempt, CredentialAuthenticator};
use crate::config::{DemoCredentials, LoginConfig};
use crate::session::SessionHandle;

/// Password check against one fixed credential pair
///
/// Placeholder only: a real deployment replaces this with a verifier that
/// talks to the identity backend.
pub struct StubCredentialAuthenticator {
    session: SessionHandle,
    demo: DemoCredentials,
    max_attempts: u32,
    delay: Duration,
}

impl StubCredentialAuthenticator {
    pub fn new(session: SessionHandle, config: &LoginConfig) -> Self {
        Self {
            session,
            demo: config.demo.clone(),
            max_attempts: config.max_password_attempts,
            delay: config.credential_delay(),
        }
    }
}

#[async_trait]
impl CredentialAuthenticator for StubCredentialAuthenticator {
    async fn authenticate(&self, attempt: &CredentialAttempt) -> AuthenticationResult {
        // Simulated network latency
        tokio::time::sleep(self.delay).await;

        let matches = attempt.username == self.demo.username
            && attempt.password.as_str() == self.demo.password;
        let max_attempts = self.max_attempts;

        self.session
            .update(|session| {
                if session.is_password_locked(max_attempts) {
                    return AuthenticationResult::locked(
                        "Account locked. Please contact support.",
                    );
                }

                if matches {
                    session.failed_password_attempts = 0;
                    AuthenticationResult::ok("Password verified. Please enter the 6-digit token.")
                } else {
                    session.failed_password_attempts += 1;
                    tracing::debug!(
                        "Invalid credentials ({} of {})",
                        session.failed_password_attempts,
                        max_attempts
                    );
                    AuthenticationResult::invalid("Invalid credentials")
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthStatus;
    use rstest::rstest;

    fn authenticator() -> (StubCredentialAuthenticator, SessionHandle) {
        let session = SessionHandle::new();
        let auth = StubCredentialAuthenticator::new(session.clone(), &LoginConfig::default());
        (auth, session)
    }

    #[rstest]
    #[case("admin", "wrong")]
    #[case("Admin", "12345")]
    #[case("root", "12345")]
    #[case("", "")]
    #[tokio::test(start_paused = true)]
    async fn test_invalid_increments_by_one(#[case] username: &str, #[case] password: &str) {
        let (auth, session) = authenticator();

        let result = auth
            .authenticate(&CredentialAttempt::new(username, password))
            .await;

        assert!(!result.success);
        assert_eq!(result.status, AuthStatus::Invalid);
        assert_eq!(result.message, "Invalid credentials");
        assert_eq!(session.snapshot().await.failed_password_attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_pair_resets_counter() {
        let (auth, session) = authenticator();
        session.update(|s| s.failed_password_attempts = 4).await;

        let result = auth
            .authenticate(&CredentialAttempt::new("admin", "12345"))
            .await;

        assert!(result.success);
        assert_eq!(result.status, AuthStatus::OkPassword);
        assert_eq!(session.snapshot().await.failed_password_attempts, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lockout_after_five_failures() {
        let (auth, session) = authenticator();

        for _ in 0..5 {
            let result = auth
                .authenticate(&CredentialAttempt::new("admin", "wrong"))
                .await;
            assert_eq!(result.status, AuthStatus::Invalid);
        }

        // Even the correct pair is refused once locked
        let result = auth
            .authenticate(&CredentialAttempt::new("admin", "12345"))
            .await;
        assert_eq!(result.status, AuthStatus::Locked);
        assert_eq!(result.message, "Account locked. Please contact support.");
        assert_eq!(session.snapshot().await.failed_password_attempts, 5);

        session.reset().await;
        let result = auth
            .authenticate(&CredentialAttempt::new("admin", "12345"))
            .await;
        assert_eq!(result.status, AuthStatus::OkPassword);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency() {
        let (auth, _session) = authenticator();
        let start = tokio::time::Instant::now();

        auth.authenticate(&CredentialAttempt::new("admin", "12345"))
            .await;

        assert!(start.elapsed() >= Duration::from_millis(800));
    }
}
