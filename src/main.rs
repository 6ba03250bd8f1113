//! ZRush CLI - play a game of ZRush at the console.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// ZRush - a turn-based resource-and-combat game
#[derive(Parser, Debug)]
#[command(name = "zrush")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of players, 2-8 (prompted for if neither this nor --config is given)
    #[arg(short, long)]
    players: Option<usize>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for dice rolls (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// End the game after this many rounds
    #[arg(short = 'r', long)]
    max_rounds: Option<u32>,

    /// Victory condition checked after every turn
    #[arg(long, value_enum)]
    victory: Option<cli::VictoryArg>,

    /// Final report format: text or json
    #[arg(short, long, default_value = "text")]
    format: cli::OutputFormat,

    /// Diagnostic log level on stderr (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Suppress the banner
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let result = cli::run::execute(&cli::run::RunOptions {
        players: args.players,
        config: args.config,
        seed: args.seed,
        max_rounds: args.max_rounds,
        victory: args.victory,
        format: args.format,
        quiet: args.quiet,
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
