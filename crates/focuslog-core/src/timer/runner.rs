//! Session runner.
//!
//! Drives one work session from start to completion. Pacing comes from the
//! [`Clock`]; rendering is left to a [`SessionObserver`] that receives every
//! tick and event as a callback.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Completed
//! ```
//!
//! There is no cancelled state. A session that is abandoned mid-countdown
//! (the process exits) logs nothing.
//!
//! ## Usage
//!
//! ```ignore
//! let plan = SessionPlan::new("Write report", 25, 5)?;
//! let mut runner = SessionRunner::new(SystemClock::new());
//! let record = runner.run(&plan, &store, &mut |tick: &Tick| println!("{}", tick.clock()))?;
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::countdown::{Countdown, Tick};
use crate::error::{Result, SessionError};
use crate::events::Event;
use crate::session::{SessionPlan, SessionRecord};
use crate::storage::SessionLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerState {
    Idle,
    Running,
    Completed,
}

/// Receives runner output as it happens.
pub trait SessionObserver {
    fn on_event(&mut self, _event: &Event) {}
    fn on_tick(&mut self, _tick: &Tick) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

impl<F: FnMut(&Tick)> SessionObserver for F {
    fn on_tick(&mut self, tick: &Tick) {
        self(tick)
    }
}

/// One-shot runner for a single session.
#[derive(Debug)]
pub struct SessionRunner<C> {
    clock: C,
    state: RunnerState,
}

impl<C: Clock> SessionRunner<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: RunnerState::Idle,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validate the task and durations, then run the session.
    ///
    /// An invalid label or duration is reported before anything else
    /// happens: the runner stays `Idle` and the log is untouched.
    ///
    /// # Errors
    /// See [`SessionRunner::run`]; additionally [`crate::CoreError::Validation`].
    pub fn start_task<L, O>(
        &mut self,
        task: &str,
        work_minutes: u32,
        break_minutes: u32,
        log: &L,
        observer: &mut O,
    ) -> Result<SessionRecord>
    where
        L: SessionLog + ?Sized,
        O: SessionObserver + ?Sized,
    {
        let plan = SessionPlan::new(task, work_minutes, break_minutes)?;
        self.run(&plan, log, observer)
    }

    /// Run `plan` to completion and append its record to `log`.
    ///
    /// Blocks for `work_minutes * 60` ticks of the clock. On reaching zero
    /// the runner becomes `Completed`, emits exactly one
    /// [`Event::SessionCompleted`], and appends exactly one record.
    ///
    /// # Errors
    /// [`SessionError::NotIdle`] if this runner was already used.
    /// [`crate::CoreError::Storage`] if the completed session could not be logged;
    /// the runner is still `Completed` in that case.
    pub fn run<L, O>(
        &mut self,
        plan: &SessionPlan,
        log: &L,
        observer: &mut O,
    ) -> Result<SessionRecord>
    where
        L: SessionLog + ?Sized,
        O: SessionObserver + ?Sized,
    {
        if self.state != RunnerState::Idle {
            return Err(SessionError::NotIdle { state: self.state }.into());
        }

        self.state = RunnerState::Running;
        tracing::info!(
            task = plan.task(),
            work_minutes = plan.work_minutes(),
            "session started"
        );
        observer.on_event(&Event::SessionStarted {
            task: plan.task().to_string(),
            work_minutes: plan.work_minutes(),
            total_secs: plan.total_secs(),
            at: Utc::now(),
        });

        for tick in Countdown::new(&mut self.clock, plan.total_secs()) {
            observer.on_tick(&tick);
        }

        self.state = RunnerState::Completed;
        let record = plan.record(self.clock.today());
        observer.on_event(&Event::SessionCompleted {
            task: record.task.clone(),
            work_minutes: record.work_minutes,
            date: record.date,
            at: Utc::now(),
        });

        if let Err(e) = log.append(&record) {
            tracing::error!(
                date = %record.date,
                task = %record.task,
                work_minutes = record.work_minutes,
                error = %e,
                "completed session could not be logged"
            );
            return Err(e.into());
        }

        tracing::info!(
            task = %record.task,
            work_minutes = record.work_minutes,
            "session completed"
        );
        Ok(record)
    }
}
