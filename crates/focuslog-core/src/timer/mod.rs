mod clock;
mod countdown;
mod runner;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{Countdown, Tick, TICK};
pub use runner::{NoopObserver, RunnerState, SessionObserver, SessionRunner};
