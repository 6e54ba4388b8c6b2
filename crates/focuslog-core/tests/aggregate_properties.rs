//! Property tests: summaries do not depend on log order.

use chrono::NaiveDate;
use focuslog_core::stats;
use focuslog_core::SessionRecord;
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = SessionRecord> {
    (1u32..=5, "[a-z]{1,8}", 1u32..=90).prop_map(|(day, task, minutes)| {
        SessionRecord::new(
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            task,
            minutes,
        )
    })
}

proptest! {
    #[test]
    fn summaries_are_order_independent(
        (records, shuffled) in prop::collection::vec(record_strategy(), 0..40)
            .prop_flat_map(|records| {
                let shuffled = Just(records.clone()).prop_shuffle();
                (Just(records), shuffled)
            }),
        probe in 1u32..=5,
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 5, probe).unwrap();
        prop_assert_eq!(stats::all_time(&records), stats::all_time(&shuffled));
        prop_assert_eq!(stats::today(&records, date), stats::today(&shuffled, date));
        prop_assert_eq!(stats::by_day(&records), stats::by_day(&shuffled));
    }

    #[test]
    fn by_day_totals_add_up(records in prop::collection::vec(record_strategy(), 0..40)) {
        let days = stats::by_day(&records);
        let minutes: u64 = days.iter().map(|d| d.total_minutes).sum();
        let sessions: u64 = days.iter().map(|d| d.session_count).sum();
        prop_assert_eq!(minutes, stats::all_time(&records));
        prop_assert_eq!(sessions, records.len() as u64);
        prop_assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }
}
