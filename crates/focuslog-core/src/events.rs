use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// The shell renders them; nothing else subscribes yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        task: String,
        work_minutes: u32,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// Emitted exactly once per session, only on natural completion.
    SessionCompleted {
        task: String,
        work_minutes: u32,
        date: NaiveDate,
        at: DateTime<Utc>,
    },
    LogCleared {
        at: DateTime<Utc>,
    },
}
