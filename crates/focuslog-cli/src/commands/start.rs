use std::io::Write;

use clap::Args;
use focuslog_core::{
    format_clock, Event, SessionObserver, SessionPlan, SessionRunner, SystemClock, Tick,
};

use super::open_log;

const BAR_WIDTH: usize = 30;

#[derive(Args)]
pub struct StartArgs {
    /// What you will work on
    pub task: String,
    /// Work minutes (1-90). Defaults to timer.work_minutes
    #[arg(long = "work", short = 'w')]
    pub work_minutes: Option<u32>,
    /// Break minutes (1-30). Defaults to timer.break_minutes
    #[arg(long = "break", short = 'b')]
    pub break_minutes: Option<u32>,
    /// Do not draw the countdown
    #[arg(long, short = 'q')]
    pub quiet: bool,
    /// Print session events as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Draws the countdown on stderr; prints events on stdout in JSON mode.
struct Progress {
    quiet: bool,
    json: bool,
}

impl Progress {
    fn draw(&self, seconds_remaining: u64, fraction_complete: f64) {
        if self.quiet {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "{}", progress_line(seconds_remaining, fraction_complete));
        if seconds_remaining == 0 {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    }
}

impl SessionObserver for Progress {
    fn on_event(&mut self, event: &Event) {
        if self.json {
            if let Ok(line) = serde_json::to_string(event) {
                println!("{line}");
            }
        } else if let Event::SessionStarted { task, .. } = event {
            eprintln!("focusing on {task}");
        }
        if let Event::SessionStarted { total_secs, .. } = event {
            self.draw(*total_secs, 0.0);
        }
    }

    fn on_tick(&mut self, tick: &Tick) {
        self.draw(tick.seconds_remaining, tick.fraction_complete);
    }
}

/// One frame of the countdown, redrawn in place.
fn progress_line(seconds_remaining: u64, fraction_complete: f64) -> String {
    let filled = ((fraction_complete * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!(
        "\r{} [{}{}] {:>3}%",
        format_clock(seconds_remaining),
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        (fraction_complete * 100.0).round() as u32
    )
}

fn clock() -> SystemClock {
    match std::env::var("FOCUSLOG_SPEEDUP").ok().and_then(|v| v.parse().ok()) {
        Some(speedup) => SystemClock::accelerated(speedup),
        None => SystemClock::new(),
    }
}

pub fn run(args: StartArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, store) = open_log()?;
    let plan = SessionPlan::new(
        &args.task,
        args.work_minutes.unwrap_or(config.timer.work_minutes),
        args.break_minutes.unwrap_or(config.timer.break_minutes),
    )?;

    let mut progress = Progress {
        quiet: args.quiet,
        json: args.json,
    };
    let mut runner = SessionRunner::new(clock());
    let record = runner.run(&plan, &store, &mut progress)?;

    if !args.json {
        println!(
            "done: {} {} ({} min) logged to {}",
            record.date,
            record.task,
            record.work_minutes,
            store.path().display()
        );
        println!("next: {} minute break", plan.break_minutes());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_shows_full_duration() {
        let line = progress_line(1500, 0.0);
        assert!(line.starts_with("\r25:00 ["));
        assert!(line.ends_with(&format!("{}]   0%", "-".repeat(BAR_WIDTH))));
    }

    #[test]
    fn last_frame_is_full() {
        let line = progress_line(0, 1.0);
        assert!(line.starts_with("\r00:00 ["));
        assert!(line.ends_with(&format!("{}] 100%", "#".repeat(BAR_WIDTH))));
    }
}
