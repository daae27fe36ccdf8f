mod commands;
mod config;
mod logging;
mod poller;
mod sink;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

use config::{LogLevel, UserConfig};
use logging::LogMode;

#[derive(Debug, Parser)]
#[command(name = "pmumon", version, about = "Periodic PMU battery telemetry collector")]
struct Cli {
    /// Override log level (off, error, warn, info, debug, trace)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Poll battery slots on a fixed interval until interrupted
    Run {
        /// Poll interval (e.g. "10s", "1m"); overrides the config value
        #[arg(short, long)]
        interval: Option<String>,
    },

    /// Run a single poll cycle and exit
    Once {
        /// Print emitted samples as JSON instead of persisting them
        #[arg(long)]
        json: bool,
    },

    /// Show how many battery slots discovery finds
    Slots,

    /// Show series store statistics
    Status,

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = UserConfig::load();
    let log_override = cli.log_level.as_deref().map(LogLevel::from_str_lossy);

    let mode = match cli.command {
        Command::Run { .. } => LogMode::Both,
        _ => LogMode::Stderr,
    };
    let _guard = logging::init(config.log_level, mode, log_override);

    match cli.command {
        Command::Run { interval } => commands::run(&config, interval),
        Command::Once { json } => commands::once(&config, json),
        Command::Slots => commands::slots(&config),
        Command::Status => commands::status(&config),
        Command::Config => commands::show_config(&config),
    }
}
