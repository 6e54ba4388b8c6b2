//! Statistics module for focuslog
//!
//! Pure summaries over a snapshot of the session log. Nothing here is
//! persisted or cached; every view is recomputed from the records it is given.

mod summary;

pub use summary::{
    all_time, by_day, newest_first, overview, today, DailySummary, Overview, TodaySummary,
};
