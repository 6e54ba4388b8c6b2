use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focuslog", version, about = "Focus timer with a local session log")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one focus session and log it when it completes
    Start(commands::start::StartArgs),
    /// Session statistics
    Stats {
        /// Skip unreadable rows instead of failing
        #[arg(long, global = true)]
        ignore_corrupt: bool,
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Logged sessions, newest first
    History(commands::history::HistoryArgs),
    /// Delete the whole session log
    Wipe(commands::wipe::WipeArgs),
    /// Report unreadable rows in the session log
    Check(commands::check::CheckArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Start(_) => "start",
            Self::Stats { .. } => "stats",
            Self::History(_) => "history",
            Self::Wipe(_) => "wipe",
            Self::Check(_) => "check",
            Self::Config { .. } => "config",
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("FOCUSLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();
    tracing::debug!(command = cli.command.name(), "dispatching");

    let result = match cli.command {
        Commands::Start(args) => commands::start::run(args),
        Commands::Stats {
            ignore_corrupt,
            action,
        } => commands::stats::run(action, ignore_corrupt),
        Commands::History(args) => commands::history::run(args),
        Commands::Wipe(args) => commands::wipe::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
