//! Lazy, time-paced countdown.
//!
//! ```ignore
//! let mut clock = SystemClock::new();
//! for tick in Countdown::new(&mut clock, 25 * 60) {
//!     // one tick per second, 1500 in total
//! }
//! ```

use std::iter::FusedIterator;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::clock::Clock;
use crate::session::format_clock;

/// Length of one countdown step.
pub const TICK: Duration = Duration::from_secs(1);

/// One per-second countdown update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub seconds_remaining: u64,
    /// elapsed / total, in (0.0, 1.0]. Exactly 1.0 on the last tick.
    pub fraction_complete: f64,
}

impl Tick {
    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.seconds_remaining)
    }
}

/// Finite sequence of [`Tick`]s counting down to zero.
///
/// Each call to `next` blocks for one [`TICK`] on the clock before yielding,
/// so nothing happens until the sequence is driven. It cannot be restarted;
/// a new session needs a new `Countdown`.
#[derive(Debug)]
pub struct Countdown<C> {
    clock: C,
    total_secs: u64,
    elapsed_secs: u64,
}

impl<C: Clock> Countdown<C> {
    pub fn new(clock: C, total_secs: u64) -> Self {
        Self {
            clock,
            total_secs,
            elapsed_secs: 0,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.total_secs - self.elapsed_secs
    }
}

impl<C: Clock> Iterator for Countdown<C> {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.elapsed_secs >= self.total_secs {
            return None;
        }
        self.clock.sleep(TICK);
        self.elapsed_secs += 1;
        Some(Tick {
            seconds_remaining: self.total_secs - self.elapsed_secs,
            fraction_complete: self.elapsed_secs as f64 / self.total_secs as f64,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.seconds_remaining()).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl<C: Clock> FusedIterator for Countdown<C> {}
