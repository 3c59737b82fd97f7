//! Wall-clock adapters.
//!
//! [`SystemClock`] is the production clock; [`MockClock`] keeps virtual time
//! that only moves when slept on or advanced explicitly.

use crate::utils::time::now_millis;
use std::cell::Cell;
use std::time::Duration;

/// Source of wall-clock time, in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;

    /// Block the event loop for `d`.
    fn sleep(&self, d: Duration);
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }

    fn sleep(&self, d: Duration) {
        (**self).sleep(d)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_millis()
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Controllable clock: `sleep` advances virtual time instead of blocking.
#[derive(Debug, Default)]
pub struct MockClock {
    now: Cell<i64>,
    sleeps: Cell<u32>,
}

impl MockClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Cell::new(start_ms),
            sleeps: Cell::new(0),
        }
    }

    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d.as_millis() as i64);
    }

    pub fn set(&self, ms: i64) {
        self.now.set(ms);
    }

    /// Number of times `sleep` was called.
    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }

    fn sleep(&self, d: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.advance(d);
    }
}
