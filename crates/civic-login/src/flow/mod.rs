//! Login flow controller
//!
//! Drives the credentials and token steps. User actions are plain method
//! calls that return immediately; authenticator calls, countdown ticks and
//! the post-login pause run as tokio tasks that report back through
//! [`FlowEvents`]. The owner feeds every received event into
//! [`LoginFlow::handle_event`].
//!
//! Two guards keep background work from touching a state it no longer
//! belongs to:
//! - every request carries the epoch it was sent in, and the epoch moves on
//!   each step change or reset;
//! - every countdown tick carries its countdown's generation, and only the
//!   currently armed countdowns are listened to.

mod events;
mod state;

pub use events::{FlowEvent, FlowEvents};
pub use state::{FlowState, FlowView, Step};

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::auth::{
    AuthStatus, AuthenticationResult, CredentialAttempt, CredentialAuthenticator, ResendResult,
    StubCredentialAuthenticator, StubTokenAuthenticator, TokenAuthenticator, TokenStatus,
    TokenVerificationResult,
};
use crate::config::LoginConfig;
use crate::countdown::{Countdown, TimerKind};
use crate::error::LoginFailure;
use crate::notify::NotificationDispatcher;
use crate::session::SessionHandle;
use crate::validation::{validate_credentials, validate_password, validate_username};

const EXPIRED_TITLE: &str = "Token Expired";
const EXPIRED_MESSAGE: &str = "Please resend a new token to continue.";

/// The two-step sign-in state machine
pub struct LoginFlow {
    config: LoginConfig,
    session: SessionHandle,
    credentials: Arc<dyn CredentialAuthenticator>,
    tokens: Arc<dyn TokenAuthenticator>,
    notifier: NotificationDispatcher,
    events: mpsc::UnboundedSender<FlowEvent>,
    state: FlowState,
    epoch: u64,
    resend_timer: Option<Countdown>,
    expiry_timer: Option<Countdown>,
    attempts_remaining: u32,
}

impl LoginFlow {
    /// Create a flow backed by the stub authenticators
    pub fn new(config: LoginConfig) -> (Self, FlowEvents) {
        let session = SessionHandle::new();
        let credentials = Arc::new(StubCredentialAuthenticator::new(session.clone(), &config));
        let tokens = Arc::new(StubTokenAuthenticator::new(session.clone(), &config));
        Self::with_authenticators(config, session, credentials, tokens)
    }

    /// Create a flow with custom authenticators sharing `session`
    pub fn with_authenticators(
        config: LoginConfig,
        session: SessionHandle,
        credentials: Arc<dyn CredentialAuthenticator>,
        tokens: Arc<dyn TokenAuthenticator>,
    ) -> (Self, FlowEvents) {
        if let Err(e) = config.validate() {
            warn!("Starting login flow with questionable settings: {}", e);
        }
        let (events, receiver) = mpsc::unbounded_channel();
        let flow = Self {
            notifier: NotificationDispatcher::new(config.notification_duration_ms),
            attempts_remaining: config.max_password_attempts,
            config,
            session,
            credentials,
            tokens,
            events,
            state: FlowState::new(),
            epoch: 0,
            resend_timer: None,
            expiry_timer: None,
        };
        (flow, FlowEvents::new(receiver))
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn config(&self) -> &LoginConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn notifications(&self) -> &NotificationDispatcher {
        &self.notifier
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> FlowView {
        FlowView::from_state(&self.state, self.attempts_remaining)
    }

    // ------------------------------------------------------------------
    // Credentials step
    // ------------------------------------------------------------------

    /// Update the username, re-checking it while non-empty
    pub fn set_username(&mut self, value: impl Into<String>) {
        if self.state.step != Step::Credentials || self.state.is_submitting {
            return;
        }
        self.state.username = value.into();
        if !self.state.username.is_empty() {
            self.state.field_errors.username =
                validate_username(&self.state.username, self.config.min_username_len);
        }
    }

    /// Update the password, re-checking it while non-empty
    pub fn set_password(&mut self, value: impl Into<String>) {
        if self.state.step != Step::Credentials || self.state.is_submitting {
            return;
        }
        self.state.password = Zeroizing::new(value.into());
        if !self.state.password.is_empty() {
            self.state.field_errors.password =
                validate_password(&self.state.password, self.config.min_password_len);
        }
    }

    /// Submit the typed credentials
    ///
    /// Field problems block the submission and come back as
    /// [`LoginFailure::Validation`]; the authenticator is not called. A
    /// submission while another is in flight is ignored.
    pub fn submit_credentials(&mut self) -> Result<(), LoginFailure> {
        if self.state.step != Step::Credentials || self.state.is_submitting {
            debug!("Ignoring credential submission");
            return Ok(());
        }

        self.state.error = None;
        let errors = validate_credentials(
            &self.state.username,
            &self.state.password,
            self.config.min_username_len,
            self.config.min_password_len,
        );
        self.state.field_errors = errors.clone();
        if !errors.is_empty() {
            let failure = LoginFailure::Validation(errors);
            self.state.error = Some(failure.clone());
            return Err(failure);
        }

        self.state.is_submitting = true;
        info!("Credentials submitted for {}", self.state.username);

        let attempt = CredentialAttempt {
            username: self.state.username.clone(),
            password: self.state.password.clone(),
        };
        let epoch = self.epoch;
        let credentials = Arc::clone(&self.credentials);
        let session = self.session.clone();
        let max_attempts = self.config.max_password_attempts;
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = credentials.authenticate(&attempt).await;
            let attempts_remaining = session
                .snapshot()
                .await
                .password_attempts_remaining(max_attempts);
            let _ = events.send(FlowEvent::CredentialsChecked {
                epoch,
                result,
                attempts_remaining,
            });
        });

        Ok(())
    }

    fn on_credentials_checked(&mut self, result: AuthenticationResult, attempts_remaining: u32) {
        self.state.is_submitting = false;
        self.attempts_remaining = attempts_remaining;

        match result.status {
            AuthStatus::OkPassword if result.success => {
                info!("Password verified for {}", self.state.username);
                self.enter_token_step();
                self.notifier.success(
                    "A 6-digit token has been generated in your authenticator app. Open the app to view it.",
                    Some("Token Generated"),
                );
            }
            AuthStatus::Locked => {
                warn!("Account locked for {}", self.state.username);
                self.notifier.error(result.message.clone(), Some("Login Failed"));
                self.state.error = Some(LoginFailure::Lockout(result.message));
            }
            _ => {
                info!(
                    "Credentials rejected ({} attempts remaining)",
                    attempts_remaining
                );
                self.notifier.error(result.message.clone(), Some("Login Failed"));
                self.state.error = Some(LoginFailure::Authentication(result.message));
            }
        }
    }

    // ------------------------------------------------------------------
    // Token step
    // ------------------------------------------------------------------

    fn enter_token_step(&mut self) {
        self.epoch += 1;
        self.state
            .enter_token_step(self.config.resend_cooldown_secs, self.config.token_expiry_secs);
        self.arm_countdowns();
    }

    /// (Re)start both countdowns from the configured values
    fn arm_countdowns(&mut self) {
        self.cancel_countdowns();

        let period = self.config.tick();
        if self.state.resend_cooldown_seconds > 0 {
            self.resend_timer = Some(Countdown::start(
                TimerKind::ResendCooldown,
                self.state.resend_cooldown_seconds,
                period,
                self.events.clone(),
            ));
        }
        if self.state.token_expiry_seconds > 0 {
            self.expiry_timer = Some(Countdown::start(
                TimerKind::TokenExpiry,
                self.state.token_expiry_seconds,
                period,
                self.events.clone(),
            ));
        } else {
            self.expire_token();
        }
    }

    fn cancel_countdowns(&mut self) {
        if let Some(timer) = self.resend_timer.take() {
            timer.cancel();
        }
        if let Some(timer) = self.expiry_timer.take() {
            timer.cancel();
        }
    }

    fn on_tick(&mut self, timer: TimerKind, generation: u64, remaining: u32) {
        let slot = match timer {
            TimerKind::ResendCooldown => &mut self.resend_timer,
            TimerKind::TokenExpiry => &mut self.expiry_timer,
        };
        let is_current = slot
            .as_ref()
            .is_some_and(|countdown| countdown.generation() == generation);
        if !is_current || self.state.step != Step::Token {
            return;
        }
        if remaining == 0 {
            *slot = None;
        }

        match timer {
            TimerKind::ResendCooldown => {
                self.state.resend_cooldown_seconds = remaining;
                if remaining == 0 {
                    self.state.can_resend = true;
                }
            }
            TimerKind::TokenExpiry => {
                self.state.token_expiry_seconds = remaining;
                if remaining == 0 {
                    self.expire_token();
                }
            }
        }
    }

    /// The expiry countdown ran out
    fn expire_token(&mut self) {
        info!("Token expired");
        self.state.error = Some(LoginFailure::Expiry);
        self.state.can_resend = true;
        if !self.state.has_notified_expiry {
            self.state.has_notified_expiry = true;
            self.notifier.error(EXPIRED_MESSAGE, Some(EXPIRED_TITLE));
        }
    }

    /// Type one character into the token boxes; a sixth digit submits
    pub fn token_input(&mut self, c: char) {
        if self.state.step != Step::Token {
            return;
        }
        if let Some(code) = self.state.token.input(c) {
            self.submit_token(code);
        }
    }

    /// Paste a whole token; six digits submit immediately
    pub fn paste_token(&mut self, text: &str) {
        if self.state.step != Step::Token {
            return;
        }
        if let Some(code) = self.state.token.paste(text) {
            self.submit_token(code);
        }
    }

    pub fn token_backspace(&mut self) {
        self.state.token.backspace();
    }

    pub fn token_left(&mut self) {
        self.state.token.move_left();
    }

    pub fn token_right(&mut self) {
        self.state.token.move_right();
    }

    /// Submit the boxes as they are, if all six are filled
    pub fn submit_entered_token(&mut self) {
        if let Some(code) = self.state.token.completed() {
            self.submit_token(code);
        }
    }

    /// Send `code` for verification
    ///
    /// Ignored outside the token step, while a check is in flight, or once
    /// the current token has expired.
    pub fn submit_token(&mut self, code: String) {
        if self.state.step != Step::Token || self.state.is_submitting {
            debug!("Ignoring token submission");
            return;
        }
        if !self.state.token_is_live() {
            debug!("Ignoring token submission after expiry");
            return;
        }

        self.state.is_submitting = true;
        self.state.error = None;
        self.state.token.set_disabled(true);
        info!("Token submitted for {}", self.state.username);

        let epoch = self.epoch;
        let tokens = Arc::clone(&self.tokens);
        let username = self.state.username.clone();
        let events = self.events.clone();
        let code = Zeroizing::new(code);

        tokio::spawn(async move {
            let result = tokens.verify(&username, &code).await;
            let _ = events.send(FlowEvent::TokenChecked { epoch, result });
        });
    }

    fn on_token_checked(&mut self, result: TokenVerificationResult) {
        self.state.token.set_disabled(false);

        match result.status {
            TokenStatus::Ok if result.success => {
                info!("Login successful for {}", self.state.username);
                self.cancel_countdowns();
                self.state.login_succeeded = true;
                self.state.error = None;
                // Inputs stay locked until the flow resets
                self.state.token.set_disabled(true);
                self.notifier.success(
                    format!("Welcome, {}!", self.state.username),
                    Some("Login Successful"),
                );

                let epoch = self.epoch;
                let delay = self.config.success_reset();
                let events = self.events.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = events.send(FlowEvent::ResetElapsed { epoch });
                });
            }
            TokenStatus::Expired => {
                info!("Token reported expired");
                self.state.is_submitting = false;
                self.cancel_countdowns();
                self.state.resend_cooldown_seconds = 0;
                self.state.token_expiry_seconds = 0;
                self.state.can_resend = true;
                self.state.token.clear();
                self.state.error = Some(LoginFailure::Expiry);
                if !self.state.has_notified_expiry {
                    self.state.has_notified_expiry = true;
                    self.notifier.error(EXPIRED_MESSAGE, Some(EXPIRED_TITLE));
                }
            }
            _ => {
                info!("Token rejected");
                self.state.is_submitting = false;
                self.state.token.clear();
                self.notifier.error(result.message.clone(), Some("Invalid Token"));
                self.state.error = Some(LoginFailure::Authentication(result.message));
            }
        }
    }

    /// Request a new token once the cooldown allows it
    ///
    /// Refused while a token check is in flight, so a verdict on the old
    /// token can never land on the new one.
    pub fn resend(&mut self) {
        if self.state.step != Step::Token
            || !self.state.can_resend
            || self.state.is_resending
            || self.state.is_submitting
            || self.state.login_succeeded
        {
            debug!("Ignoring resend request");
            return;
        }

        info!("Resending token for {}", self.state.username);
        self.state.is_resending = true;
        self.state.error = None;
        self.state.token.clear();
        self.state
            .rearm(self.config.resend_cooldown_secs, self.config.token_expiry_secs);
        self.arm_countdowns();

        let epoch = self.epoch;
        let tokens = Arc::clone(&self.tokens);
        let username = self.state.username.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = tokens.resend(&username).await;
            let _ = events.send(FlowEvent::TokenResent { epoch, result });
        });
    }

    fn on_token_resent(&mut self, result: ResendResult) {
        self.state.is_resending = false;
        if result.success {
            self.notifier.success(
                "A new 6-digit token has been sent to your authenticator app",
                Some("Token Resent"),
            );
        } else {
            warn!("Resend failed: {}", result.message);
            self.state.can_resend = true;
            self.notifier.error(result.message, Some("Resend Failed"));
        }
    }

    /// Return to the credentials step
    ///
    /// Password attempt counters are left as they are.
    pub fn back_to_login(&mut self) {
        if self.state.step != Step::Token {
            return;
        }
        info!("Back to login");
        self.epoch += 1;
        self.cancel_countdowns();
        self.state.leave_token_step();
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Discard all per-login state and start over at the credentials step
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.cancel_countdowns();
        self.state = FlowState::new();
    }

    /// Explicit logout: clears the session counters and the flow
    pub async fn logout(&mut self) {
        info!("Logout");
        self.session.reset().await;
        self.attempts_remaining = self.config.max_password_attempts;
        self.reset();
    }

    /// Apply a background completion or tick
    pub fn handle_event(&mut self, event: FlowEvent) {
        match event {
            FlowEvent::Tick {
                timer,
                generation,
                remaining,
            } => self.on_tick(timer, generation, remaining),
            FlowEvent::CredentialsChecked {
                epoch,
                result,
                attempts_remaining,
            } => {
                if self.is_stale(epoch, Step::Credentials) {
                    return;
                }
                self.on_credentials_checked(result, attempts_remaining);
            }
            FlowEvent::TokenChecked { epoch, result } => {
                if self.is_stale(epoch, Step::Token) {
                    return;
                }
                self.on_token_checked(result);
            }
            FlowEvent::TokenResent { epoch, result } => {
                if self.is_stale(epoch, Step::Token) {
                    return;
                }
                self.on_token_resent(result);
            }
            FlowEvent::ResetElapsed { epoch } => {
                if epoch == self.epoch && self.state.login_succeeded {
                    debug!("Resetting flow after login");
                    self.reset();
                }
            }
        }
    }

    fn is_stale(&self, epoch: u64, step: Step) -> bool {
        let stale = epoch != self.epoch || self.state.step != step;
        if stale {
            debug!("Discarding stale completion from epoch {}", epoch);
        }
        stale
    }
}
