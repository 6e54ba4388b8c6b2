//! Integration tests for the session lifecycle.
//!
//! Runs sessions against a real CSV log in a temp directory and checks the
//! log and the summaries derived from it.

use chrono::NaiveDate;
use focuslog_core::stats;
use focuslog_core::{
    CoreError, LogStore, ManualClock, NoopObserver, RunnerState, SessionLog, SessionRecord,
    SessionRunner, Tick, ValidationError,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

fn temp_store() -> (tempfile::TempDir, LogStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LogStore::new(dir.path().join("focus_log.csv"));
    (dir, store)
}

#[test]
fn write_report_scenario() {
    let (_dir, store) = temp_store();
    let mut runner = SessionRunner::new(ManualClock::new(day(1)));
    let mut ticks = 0u64;

    runner
        .start_task("Write report", 25, 5, &store, &mut |_: &Tick| ticks += 1)
        .unwrap();

    assert_eq!(ticks, 1500);
    let records = store.load_all().unwrap();
    assert_eq!(records, vec![SessionRecord::new(day(1), "Write report", 25)]);

    let summary = stats::today(&records, day(1));
    assert_eq!(summary.total_minutes, 25);
    assert_eq!(summary.session_count, 1);

    let text = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(text, "date,task,work_min\n2024-05-01,Write report,25\n");
}

#[test]
fn append_then_load_returns_record_last() {
    let (_dir, store) = temp_store();
    store.append(&SessionRecord::new(day(1), "a", 10)).unwrap();
    let before = store.load_all().unwrap().len();

    let record = SessionRecord::new(day(2), "comma, \"quote\"", 15);
    store.append(&record).unwrap();

    let after = store.load_all().unwrap();
    assert_eq!(after.len(), before + 1);
    assert_eq!(after.last(), Some(&record));
}

#[test]
fn load_is_repeatable() {
    let (_dir, store) = temp_store();
    store.append(&SessionRecord::new(day(1), "a", 10)).unwrap();
    store.append(&SessionRecord::new(day(1), "b", 20)).unwrap();
    assert_eq!(store.load_all().unwrap(), store.load_all().unwrap());
}

#[test]
fn log_survives_reopening() {
    let (dir, store) = temp_store();
    store.append(&SessionRecord::new(day(1), "a", 10)).unwrap();
    drop(store);

    let reopened = LogStore::new(dir.path().join("focus_log.csv"));
    assert_eq!(reopened.load_all().unwrap().len(), 1);
}

#[test]
fn clear_destroys_all() {
    let (_dir, store) = temp_store();
    for d in 1..=3 {
        store.append(&SessionRecord::new(day(d), "a", 10)).unwrap();
    }
    store.clear().unwrap();
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn empty_task_leaves_log_unchanged() {
    let (_dir, store) = temp_store();
    store.append(&SessionRecord::new(day(1), "a", 10)).unwrap();
    let before = store.load_all().unwrap().len();

    let mut runner = SessionRunner::new(ManualClock::new(day(1)));
    let err = runner
        .start_task("", 25, 5, &store, &mut NoopObserver)
        .unwrap_err();

    assert!(matches!(err, CoreError::Validation(ValidationError::EmptyTask)));
    assert_eq!(runner.state(), RunnerState::Idle);
    assert_eq!(store.load_all().unwrap().len(), before);
}

#[test]
fn each_completion_appends_exactly_one_record() {
    let (_dir, store) = temp_store();
    for (n, minutes) in [1u32, 5, 90].into_iter().enumerate() {
        let mut runner = SessionRunner::new(ManualClock::new(day(1)));
        runner
            .start_task("focus", minutes, 5, &store, &mut NoopObserver)
            .unwrap();

        let records = store.load_all().unwrap();
        assert_eq!(records.len(), n + 1);
        assert_eq!(records[n].work_minutes, minutes);
        assert_eq!(
            runner.clock().slept(),
            std::time::Duration::from_secs(u64::from(minutes) * 60)
        );
    }
}

#[test]
fn empty_log_today_is_zero() {
    let (_dir, store) = temp_store();
    let records = store.load_all().unwrap();
    let summary = stats::today(&records, day(17));
    assert_eq!((summary.total_minutes, summary.session_count), (0, 0));
}

#[test]
fn two_sessions_same_day() {
    let (_dir, store) = temp_store();
    store.append(&SessionRecord::new(day(4), "a", 10)).unwrap();
    store.append(&SessionRecord::new(day(4), "b", 15)).unwrap();

    let records = store.load_all().unwrap();
    assert_eq!(stats::all_time(&records), 25);
    let days = stats::by_day(&records);
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].date, day(4));
    assert_eq!(days[0].total_minutes, 25);
}

#[test]
fn sessions_on_different_days_are_dated_by_clock() {
    let (_dir, store) = temp_store();
    let mut clock = ManualClock::new(day(1));
    SessionRunner::new(&mut clock)
        .start_task("a", 1, 1, &store, &mut NoopObserver)
        .unwrap();
    clock.set_today(day(2));
    SessionRunner::new(&mut clock)
        .start_task("b", 2, 1, &store, &mut NoopObserver)
        .unwrap();

    let records = store.load_all().unwrap();
    assert_eq!(stats::today(&records, day(2)).total_minutes, 2);
    assert_eq!(stats::by_day(&records).len(), 2);
}
