//! Events delivered back to the flow controller

use tokio::sync::mpsc;

use crate::auth::{AuthenticationResult, ResendResult, TokenVerificationResult};
use crate::countdown::TimerKind;

/// Completions and ticks produced by background tasks
#[derive(Debug, Clone)]
pub enum FlowEvent {
    /// One countdown period elapsed
    Tick {
        timer: TimerKind,
        generation: u64,
        remaining: u32,
    },
    /// Password check finished
    CredentialsChecked {
        epoch: u64,
        result: AuthenticationResult,
        attempts_remaining: u32,
    },
    /// Token check finished
    TokenChecked {
        epoch: u64,
        result: TokenVerificationResult,
    },
    /// Resend finished
    TokenResent { epoch: u64, result: ResendResult },
    /// The post-login pause is over
    ResetElapsed { epoch: u64 },
}

/// Receiving end of the flow's event channel
pub struct FlowEvents {
    receiver: mpsc::UnboundedReceiver<FlowEvent>,
}

impl FlowEvents {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<FlowEvent>) -> Self {
        Self { receiver }
    }

    /// Wait for the next event
    pub async fn recv(&mut self) -> Option<FlowEvent> {
        self.receiver.recv().await
    }

    /// Take the next event if one is queued (non-blocking)
    pub fn try_recv(&mut self) -> Option<FlowEvent> {
        self.receiver.try_recv().ok()
    }
}
