//! Civic Login
//!
//! The state machine behind the municipal portal sign-in screen: a
//! credentials step, a six-digit one-time token step with expiry and resend
//! countdowns, and the toast notifications surfaced along the way.
//!
//! Authentication is simulated by stub authenticators with fixed delays and
//! placeholder credentials. Everything that renders pixels lives in a
//! separate collaborator that reads [`FlowView`] snapshots and the
//! [`NotificationDispatcher`] list.

pub mod auth;
pub mod config;
pub mod countdown;
pub mod error;
pub mod flow;
pub mod notify;
pub mod session;
pub mod token_input;
pub mod utils;
pub mod validation;

pub use auth::{
    AuthStatus, AuthenticationResult, CredentialAttempt, CredentialAuthenticator, ResendResult,
    StubCredentialAuthenticator, StubTokenAuthenticator, TokenAuthenticator, TokenStatus,
    TokenVerificationResult,
};
pub use config::{DemoCredentials, LoginConfig};
pub use countdown::{Countdown, TimerKind};
pub use error::{Error, LoginFailure, Result};
pub use flow::{FlowEvent, FlowEvents, FlowState, FlowView, LoginFlow, Step};
pub use notify::{Notification, NotificationDispatcher, NotificationKind};
pub use session::{Session, SessionHandle};
pub use token_input::{TokenInput, TOKEN_LENGTH};
pub use validation::FieldErrors;
