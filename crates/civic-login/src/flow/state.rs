//! Flow state and the snapshot handed to the renderer

use std::fmt;

use zeroize::Zeroizing;

use crate::error::LoginFailure;
use crate::token_input::{TokenInput, TOKEN_LENGTH};
use crate::utils::format_mm_ss;
use crate::validation::FieldErrors;

/// Visible step of the sign-in form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    /// Username and password
    #[default]
    Credentials,

    /// Six-digit one-time token
    Token,
}

/// Per-login state owned by the flow controller
#[derive(Clone, Default)]
pub struct FlowState {
    /// Current step
    pub step: Step,

    /// Username input buffer
    pub username: String,

    /// Password input buffer
    pub password: Zeroizing<String>,

    /// Inline messages under the credential fields
    pub field_errors: FieldErrors,

    /// Authentication-level error shown in the alert region
    pub error: Option<LoginFailure>,

    /// Token entry boxes
    pub token: TokenInput,

    /// Seconds until a resend is allowed
    pub resend_cooldown_seconds: u32,

    /// Seconds until the current token stops being accepted
    pub token_expiry_seconds: u32,

    /// Whether a new token may be requested
    pub can_resend: bool,

    /// Whether the current token's expiry toast has already fired
    pub has_notified_expiry: bool,

    /// A credential or token check is in flight
    pub is_submitting: bool,

    /// A resend is in flight
    pub is_resending: bool,

    /// The token was accepted; the flow resets shortly
    pub login_succeeded: bool,
}

impl FlowState {
    /// Create a fresh credentials-step state
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the token step with fresh countdowns
    pub fn enter_token_step(&mut self, resend_cooldown_secs: u32, token_expiry_secs: u32) {
        self.step = Step::Token;
        self.error = None;
        self.token.clear();
        self.token.set_disabled(false);
        self.rearm(resend_cooldown_secs, token_expiry_secs);
    }

    /// Restart both countdowns for a newly issued token
    pub fn rearm(&mut self, resend_cooldown_secs: u32, token_expiry_secs: u32) {
        self.resend_cooldown_seconds = resend_cooldown_secs;
        self.token_expiry_seconds = token_expiry_secs;
        self.can_resend = resend_cooldown_secs == 0;
        self.has_notified_expiry = false;
    }

    /// Leave the token step, keeping the typed credentials
    pub fn leave_token_step(&mut self) {
        self.step = Step::Credentials;
        self.error = None;
        self.token.clear();
        self.token.set_disabled(false);
        self.resend_cooldown_seconds = 0;
        self.token_expiry_seconds = 0;
        self.can_resend = false;
        self.has_notified_expiry = false;
        self.is_submitting = false;
        self.is_resending = false;
        self.login_succeeded = false;
    }

    /// Whether the current token can still be submitted
    pub fn token_is_live(&self) -> bool {
        self.step == Step::Token && self.token_expiry_seconds > 0
    }
}

impl fmt::Debug for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowState")
            .field("step", &self.step)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("error", &self.error)
            .field("resend_cooldown_seconds", &self.resend_cooldown_seconds)
            .field("token_expiry_seconds", &self.token_expiry_seconds)
            .field("can_resend", &self.can_resend)
            .field("is_submitting", &self.is_submitting)
            .field("login_succeeded", &self.login_succeeded)
            .finish_non_exhaustive()
    }
}

/// Owned snapshot of everything the renderer shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowView {
    pub step: Step,
    pub username: String,
    pub password_len: usize,
    pub field_errors: FieldErrors,
    /// Alert text for authentication-level failures
    pub error: Option<String>,
    pub token_slots: [Option<char>; TOKEN_LENGTH],
    pub token_focus: usize,
    pub resend_cooldown_seconds: u32,
    pub token_expiry_seconds: u32,
    /// Resend cooldown as MM:SS
    pub resend_in: String,
    /// Token expiry as MM:SS
    pub expires_in: String,
    pub can_resend: bool,
    pub is_submitting: bool,
    pub is_resending: bool,
    pub login_succeeded: bool,
    /// Password attempts left before lockout
    pub attempts_remaining: u32,
}

impl FlowView {
    pub(crate) fn from_state(state: &FlowState, attempts_remaining: u32) -> Self {
        // Validation problems are shown inline, not in the alert region
        let error = match &state.error {
            Some(LoginFailure::Validation(_)) | None => None,
            Some(failure) => Some(failure.to_string()),
        };

        Self {
            step: state.step,
            username: state.username.clone(),
            password_len: state.password.chars().count(),
            field_errors: state.field_errors.clone(),
            error,
            token_slots: state.token.slots(),
            token_focus: state.token.focus(),
            resend_cooldown_seconds: state.resend_cooldown_seconds,
            token_expiry_seconds: state.token_expiry_seconds,
            resend_in: format_mm_ss(state.resend_cooldown_seconds),
            expires_in: format_mm_ss(state.token_expiry_seconds),
            can_resend: state.can_resend,
            is_submitting: state.is_submitting,
            is_resending: state.is_resending,
            login_succeeded: state.login_succeeded,
            attempts_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_token_step() {
        let mut state = FlowState::new();
        state.error = Some(LoginFailure::Authentication("Invalid credentials".into()));
        state.has_notified_expiry = true;
        state.token.input('4');

        state.enter_token_step(30, 60);

        assert_eq!(state.step, Step::Token);
        assert_eq!(state.resend_cooldown_seconds, 30);
        assert_eq!(state.token_expiry_seconds, 60);
        assert!(!state.can_resend);
        assert!(!state.has_notified_expiry);
        assert!(state.error.is_none());
        assert!(state.token.is_empty());
    }

    #[test]
    fn test_leave_token_step_keeps_credentials() {
        let mut state = FlowState::new();
        state.username = "admin".into();
        state.enter_token_step(30, 60);
        state.leave_token_step();

        assert_eq!(state.step, Step::Credentials);
        assert_eq!(state.username, "admin");
        assert!(!state.token_is_live());
    }

    #[test]
    fn test_view_formats_countdowns() {
        let mut state = FlowState::new();
        state.enter_token_step(30, 60);
        state.error = Some(LoginFailure::Expiry);

        let view = FlowView::from_state(&state, 5);
        assert_eq!(view.resend_in, "00:30");
        assert_eq!(view.expires_in, "01:00");
        assert_eq!(view.error.as_deref(), Some("Token expired."));

        state.error = Some(LoginFailure::Validation(FieldErrors::default()));
        assert!(FlowView::from_state(&state, 5).error.is_none());
    }
}
