//! Session domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Allowed work duration in minutes.
pub const WORK_MINUTES_RANGE: (u32, u32) = (1, 90);
/// Allowed break duration in minutes.
pub const BREAK_MINUTES_RANGE: (u32, u32) = (1, 30);

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// One completed focus session, as persisted in the log.
///
/// Only created when a session runs to natural completion. Never mutated
/// after it has been written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub date: NaiveDate,
    pub task: String,
    #[serde(rename = "work_min")]
    pub work_minutes: u32,
}

impl SessionRecord {
    pub fn new(date: NaiveDate, task: impl Into<String>, work_minutes: u32) -> Self {
        Self {
            date,
            task: task.into(),
            work_minutes,
        }
    }
}

/// Validated configuration for one session start.
///
/// Read once when a session starts and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionPlan {
    task: String,
    work_minutes: u32,
    break_minutes: u32,
}

impl SessionPlan {
    /// Validate a task label and durations.
    ///
    /// The label is trimmed; a whitespace-only label counts as empty.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyTask`] or
    /// [`ValidationError::OutOfRange`].
    pub fn new(
        task: &str,
        work_minutes: u32,
        break_minutes: u32,
    ) -> Result<Self, ValidationError> {
        let task = task.trim();
        if task.is_empty() {
            return Err(ValidationError::EmptyTask);
        }
        check_range("work_minutes", work_minutes, WORK_MINUTES_RANGE)?;
        check_range("break_minutes", break_minutes, BREAK_MINUTES_RANGE)?;
        Ok(Self {
            task: task.to_string(),
            work_minutes,
            break_minutes,
        })
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    /// Length of the work countdown in seconds.
    pub fn total_secs(&self) -> u64 {
        u64::from(self.work_minutes) * 60
    }

    /// The record this plan produces when it completes on `date`.
    pub fn record(&self, date: NaiveDate) -> SessionRecord {
        SessionRecord::new(date, self.task.clone(), self.work_minutes)
    }
}

pub(crate) fn check_range(
    field: &'static str,
    value: u32,
    (min, max): (u32, u32),
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value: i64::from(value),
            min,
            max,
        });
    }
    Ok(())
}

/// Format seconds as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(secs: u64) -> String {
    let (mins, secs) = (secs / 60, secs % 60);
    format!("{mins:02}:{secs:02}")
}
