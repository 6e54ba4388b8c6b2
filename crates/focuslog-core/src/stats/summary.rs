use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::session::SessionRecord;

/// Totals for a single reference date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodaySummary {
    pub total_minutes: u64,
    pub session_count: u64,
}

/// Totals for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_minutes: u64,
    pub session_count: u64,
}

/// Everything the analytics view shows at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub today: TodaySummary,
    pub all_time_minutes: u64,
    pub all_time_sessions: u64,
    pub by_day: Vec<DailySummary>,
}

/// Minutes and sessions logged on `date`. `(0, 0)` when there are none.
pub fn today(records: &[SessionRecord], date: NaiveDate) -> TodaySummary {
    records
        .iter()
        .filter(|r| r.date == date)
        .fold(TodaySummary::default(), |mut acc, r| {
            acc.total_minutes += u64::from(r.work_minutes);
            acc.session_count += 1;
            acc
        })
}

/// Sum of work minutes across the whole log.
pub fn all_time(records: &[SessionRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.work_minutes)).sum()
}

/// Per-date totals, oldest date first.
///
/// Dates are grouped by exact calendar day; there is no timezone handling.
pub fn by_day(records: &[SessionRecord]) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for r in records {
        let entry = days.entry(r.date).or_default();
        entry.0 += u64::from(r.work_minutes);
        entry.1 += 1;
    }
    days.into_iter()
        .map(|(date, (total_minutes, session_count))| DailySummary {
            date,
            total_minutes,
            session_count,
        })
        .collect()
}

pub fn overview(records: &[SessionRecord], date: NaiveDate) -> Overview {
    Overview {
        today: today(records, date),
        all_time_minutes: all_time(records),
        all_time_sessions: records.len() as u64,
        by_day: by_day(records),
    }
}

/// History view: most recently appended first.
pub fn newest_first(records: &[SessionRecord]) -> impl Iterator<Item = &SessionRecord> + '_ {
    records.iter().rev()
}
