//! One-second time source driving the clock display.

use crate::core::clock::Clock;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Shared cancellation flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Lazy, infinite sequence of timestamps (ms since epoch), one per period.
///
/// The first timestamp is produced immediately. Once the token is cancelled
/// the sequence is over for good: there is no way to restart it.
pub struct TimeSource<C: Clock> {
    clock: C,
    period: Duration,
    token: CancelToken,
    started: bool,
}

impl<C: Clock> TimeSource<C> {
    pub fn start(clock: C, period: Duration) -> Self {
        Self {
            clock,
            period,
            token: CancelToken::new(),
            started: false,
        }
    }

    /// Handle that stops the sequence from anywhere on the event loop.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl<C: Clock> Iterator for TimeSource<C> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.token.is_cancelled() {
            return None;
        }

        if self.started {
            self.clock.sleep(self.period);
        } else {
            self.started = true;
        }

        Some(self.clock.now_millis())
    }
}
