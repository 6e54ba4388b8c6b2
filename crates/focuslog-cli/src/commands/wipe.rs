use chrono::Utc;
use clap::Args;
use focuslog_core::{Event, SessionLog};

use super::open_log;

#[derive(Args)]
pub struct WipeArgs {
    /// Confirm that every logged session should be deleted. There is no undo.
    #[arg(long)]
    pub yes: bool,
    /// Print the resulting event as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: WipeArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.yes {
        return Err("refusing to delete the session log without --yes".into());
    }

    let (_config, store) = open_log()?;
    store.clear()?;

    if args.json {
        let event = Event::LogCleared { at: Utc::now() };
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        println!("history cleared");
    }
    Ok(())
}
