//! In-memory authentication session with failure counters

use std::sync::Arc;

use tokio::sync::RwLock;

/// Counters shared by the credential and token authenticators
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Invalid password submissions since the last success or reset
    pub failed_password_attempts: u32,
    /// Invalid token submissions since the last success or reset
    pub failed_token_attempts: u32,
    /// Whether the second factor has been verified
    pub is_authenticated: bool,
}

impl Session {
    /// Create a fresh session
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit logout: clears both counters and the authenticated flag
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether password checks are locked for `max_attempts`
    pub fn is_password_locked(&self, max_attempts: u32) -> bool {
        self.failed_password_attempts >= max_attempts
    }

    /// Whether token checks are locked for `max_attempts`
    pub fn is_token_locked(&self, max_attempts: u32) -> bool {
        self.failed_token_attempts >= max_attempts
    }

    /// Get the number of password attempts left before lockout
    pub fn password_attempts_remaining(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.failed_password_attempts)
    }
}

/// Shared handle to a [`Session`]
///
/// Only authenticator completions write through this handle, each under a
/// single write lock, so one result is always applied atomically.
#[derive(Clone, Debug, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
}

impl SessionHandle {
    /// Create a handle around a fresh session
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current counters
    pub async fn snapshot(&self) -> Session {
        self.inner.read().await.clone()
    }

    /// Whether the token step has been passed
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_authenticated
    }

    /// Explicit logout
    pub async fn reset(&self) {
        self.inner.write().await.reset();
    }

    /// Apply `f` to the session under the write lock
    pub async fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.inner.write().await;
        f(&mut session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_reset() {
        let mut session = Session {
            failed_password_attempts: 4,
            failed_token_attempts: 2,
            is_authenticated: true,
        };
        session.reset();
        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_lock_thresholds() {
        let mut session = Session::new();
        session.failed_password_attempts = 4;
        assert!(!session.is_password_locked(5));
        assert_eq!(session.password_attempts_remaining(5), 1);

        session.failed_password_attempts = 5;
        assert!(session.is_password_locked(5));
        assert_eq!(session.password_attempts_remaining(5), 0);

        session.failed_token_attempts = 7;
        assert!(session.is_token_locked(5));
    }

    #[tokio::test]
    async fn test_handle_shares_state() {
        let handle = SessionHandle::new();
        let other = handle.clone();

        other
            .update(|s| {
                s.failed_token_attempts += 1;
                s.is_authenticated = true;
            })
            .await;

        let snapshot = handle.snapshot().await;
        assert_eq!(snapshot.failed_token_attempts, 1);
        assert!(handle.is_authenticated().await);

        handle.reset().await;
        assert!(!other.is_authenticated().await);
    }
}
