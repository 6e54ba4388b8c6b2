//! # focuslog Core Library
//!
//! Business logic for the focuslog focus timer. Everything the CLI does is
//! available here; the binary is a thin shell over the same library.
//!
//! ## Architecture
//!
//! - **Session Runner**: a one-shot `Idle -> Running -> Completed` state
//!   machine that paces a countdown through a [`Clock`] and logs the
//!   session when it runs to completion
//! - **Log Store**: append-only CSV file of completed sessions
//! - **Analytics**: pure aggregation (today, all-time, per-day) over a
//!   snapshot of the log
//! - **Config**: TOML-based defaults for work/break length and log location
//!
//! ## Key Components
//!
//! - [`SessionRunner`]: drives one session to completion
//! - [`LogStore`]: session log persistence
//! - [`Config`]: application configuration management
//! - [`stats`]: summaries derived from the log

pub mod error;
pub mod events;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, Result, SessionError, StorageError, ValidationError};
pub use events::Event;
pub use session::{format_clock, SessionPlan, SessionRecord};
pub use stats::{DailySummary, Overview, TodaySummary};
pub use storage::{Config, LoadReport, LogStore, SessionLog};
pub use timer::{
    Clock, Countdown, ManualClock, NoopObserver, RunnerState, SessionObserver, SessionRunner,
    SystemClock, Tick,
};
