//! Time sources for the session runner.

use std::time::Duration;

use chrono::{Local, NaiveDate};

/// Paces the countdown and dates completed sessions.
pub trait Clock {
    /// Block the calling flow for `period`.
    fn sleep(&mut self, period: Duration);

    /// The calendar date a session completing now belongs to.
    fn today(&self) -> NaiveDate;
}

/// Real wall-clock time, local calendar date.
///
/// Sleeps are not drift-corrected; a long session finishes slightly late.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    speedup: u32,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { speedup: 1 }
    }

    /// Divide every sleep by `speedup`. Used for demos and end-to-end tests.
    pub fn accelerated(speedup: u32) -> Self {
        Self {
            speedup: speedup.max(1),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn sleep(&mut self, period: Duration) {
        std::thread::sleep(period / self.speedup);
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that never blocks. Records how long it was asked to sleep.
#[derive(Debug, Clone)]
pub struct ManualClock {
    today: NaiveDate,
    slept: Duration,
    sleeps: u64,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            slept: Duration::ZERO,
            sleeps: 0,
        }
    }

    /// Total simulated time.
    pub fn slept(&self) -> Duration {
        self.slept
    }

    /// Number of `sleep` calls.
    pub fn sleeps(&self) -> u64 {
        self.sleeps
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }
}

impl Clock for ManualClock {
    fn sleep(&mut self, period: Duration) {
        self.slept += period;
        self.sleeps += 1;
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn sleep(&mut self, period: Duration) {
        (**self).sleep(period);
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_accumulates() {
        let mut clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        clock.sleep(Duration::from_secs(1));
        clock.sleep(Duration::from_secs(1));
        assert_eq!(clock.slept(), Duration::from_secs(2));
        assert_eq!(clock.sleeps(), 2);
    }

    #[test]
    fn accelerated_clock_sleeps_less() {
        let mut clock = SystemClock::accelerated(1000);
        let started = std::time::Instant::now();
        clock.sleep(Duration::from_secs(1));
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn zero_speedup_is_real_time() {
        let clock = SystemClock::accelerated(0);
        assert_eq!(clock.speedup, 1);
    }
}
