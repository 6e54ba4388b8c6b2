use clap::Args;

use super::open_log;

#[derive(Args)]
pub struct CheckArgs {
    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, store) = open_log()?;
    let report = store.scan()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}: {} readable sessions, {} unreadable rows",
            store.path().display(),
            report.records.len(),
            report.corrupt.len()
        );
        for row in &report.corrupt {
            println!("  line {}: {}", row.line, row.reason);
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(format!("{} unreadable rows in session log", report.corrupt.len()).into())
    }
}
