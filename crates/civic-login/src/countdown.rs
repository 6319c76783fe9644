//! Cancellable one-second countdowns

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::flow::FlowEvent;

/// Source of unique countdown generations
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Shortest tick period; a zero period would make the interval panic
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Which token-step countdown a tick belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Time left before a new token may be requested
    ResendCooldown,
    /// Time left before the current token stops being accepted
    TokenExpiry,
}

/// A running countdown task
///
/// Emits one [`FlowEvent::Tick`] per period carrying the seconds left,
/// ending with a tick of 0. Aborted on [`cancel`](Countdown::cancel) or drop.
#[derive(Debug)]
pub struct Countdown {
    kind: TimerKind,
    generation: u64,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Spawn a countdown of `seconds` ticks
    pub fn start(
        kind: TimerKind,
        seconds: u32,
        period: Duration,
        events: mpsc::UnboundedSender<FlowEvent>,
    ) -> Self {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        let period = period.max(MIN_PERIOD);

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            for remaining in (0..seconds).rev() {
                interval.tick().await;
                let tick = FlowEvent::Tick {
                    timer: kind,
                    generation,
                    remaining,
                };
                if events.send(tick).is_err() {
                    break;
                }
            }
        });

        Self {
            kind,
            generation,
            handle,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Generation stamped on every tick of this countdown
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the countdown; ticks already queued still carry the old generation
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remaining(event: FlowEvent) -> u32 {
        match event {
            FlowEvent::Tick { remaining, .. } => remaining,
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_to_zero() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let countdown = Countdown::start(TimerKind::ResendCooldown, 3, Duration::from_secs(1), tx);

        let start = Instant::now();
        assert_eq!(remaining(rx.recv().await.unwrap()), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        assert_eq!(remaining(rx.recv().await.unwrap()), 1);
        assert_eq!(remaining(rx.recv().await.unwrap()), 0);

        // Sender dropped when the task ends
        assert!(rx.recv().await.is_none());
        assert!(countdown.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let countdown = Countdown::start(TimerKind::TokenExpiry, 60, Duration::from_secs(1), tx);

        let first = rx.recv().await.unwrap();
        match first {
            FlowEvent::Tick {
                timer, generation, ..
            } => {
                assert_eq!(timer, TimerKind::TokenExpiry);
                assert_eq!(generation, countdown.generation());
            }
            other => panic!("unexpected event {:?}", other),
        }

        countdown.cancel();
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_clamped() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _countdown = Countdown::start(TimerKind::TokenExpiry, 2, Duration::ZERO, tx);

        let start = Instant::now();
        assert_eq!(remaining(rx.recv().await.unwrap()), 1);
        assert_eq!(remaining(rx.recv().await.unwrap()), 0);
        assert_eq!(start.elapsed(), MIN_PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generations_are_unique() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let a = Countdown::start(TimerKind::TokenExpiry, 1, Duration::from_secs(1), tx.clone());
        let b = Countdown::start(TimerKind::TokenExpiry, 1, Duration::from_secs(1), tx);
        assert_ne!(a.generation(), b.generation());
    }
}
