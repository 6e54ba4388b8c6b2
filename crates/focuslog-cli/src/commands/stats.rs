use clap::Subcommand;
use focuslog_core::{stats, Clock, SystemClock};
use serde_json::json;

use super::{load_readable_records, load_records, open_log};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's minutes and session count
    Today,
    /// All-time totals
    All,
    /// Minutes per day, oldest first
    Daily,
    /// Today, all-time and per-day at once
    Overview,
}

pub fn run(action: StatsAction, ignore_corrupt: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, store) = open_log()?;
    let records = if ignore_corrupt {
        load_readable_records(&store)?
    } else {
        load_records(&store)?
    };
    let today = SystemClock::new().today();

    match action {
        StatsAction::Today => {
            let summary = stats::today(&records, today);
            let out = json!({
                "date": today,
                "total_minutes": summary.total_minutes,
                "session_count": summary.session_count,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::All => {
            let out = json!({
                "total_minutes": stats::all_time(&records),
                "session_count": records.len(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Daily => {
            println!("{}", serde_json::to_string_pretty(&stats::by_day(&records))?);
        }
        StatsAction::Overview => {
            let overview = stats::overview(&records, today);
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
    }
    Ok(())
}
