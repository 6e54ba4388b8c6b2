use clap::Args;
use focuslog_core::stats;

use super::{load_records, open_log};

#[derive(Args)]
pub struct HistoryArgs {
    /// Show at most this many sessions
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
    /// Print as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: HistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, store) = open_log()?;
    let records = load_records(&store)?;
    let limit = args.limit.unwrap_or(usize::MAX);
    let rows: Vec<_> = stats::newest_first(&records).take(limit).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("no sessions logged yet");
        return Ok(());
    }

    let task_width = rows
        .iter()
        .map(|r| r.task.chars().count())
        .max()
        .unwrap_or(0)
        .max("task".len());
    println!("{:<10}  {:<task_width$}  {:>8}", "date", "task", "work_min");
    for r in rows {
        // Keep one session per line.
        let task = r.task.replace(['\r', '\n'], " ");
        println!(
            "{:<10}  {:<task_width$}  {:>8}",
            r.date.to_string(),
            task,
            r.work_minutes
        );
    }
    Ok(())
}
