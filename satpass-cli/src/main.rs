//! Satpass CLI - Command-line interface
//!
//! Predicts satellite passes and ground tracks with the satpass library.
//! Output is text, CSV or JSON for use with external plotting tools.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::pass::PassArgs;
use commands::position::PositionArgs;
use commands::track::TrackArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "satpass")]
#[command(version, about = "Satellite pass prediction from two-line element sets")]
struct Cli {
    /// Log filter, e.g. debug or satpass=trace (default: logging.level)
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List Rise, Culminate and Set events for an observer
    Pass(PassArgs),

    /// Emit ground track samples as a table, CSV or JSON
    Track(TrackArgs),

    /// Show the state vector and sub-satellite point at one instant
    Position(PositionArgs),

    /// List the built-in observer cities
    Cities,

    /// View or modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Create or complete the configuration file
    Init,
}

fn main() {
    let cli = Cli::parse();
    let log_level = cli.log_level.as_deref();

    let result: Result<(), CliError> = match cli.command {
        Commands::Pass(args) => commands::pass::run(args, log_level),
        Commands::Track(args) => commands::track::run(args, log_level),
        Commands::Position(args) => commands::position::run(args, log_level),
        Commands::Cities => commands::cities::run(),
        Commands::Config { command } => commands::config::run(command),
        Commands::Init => commands::init::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
