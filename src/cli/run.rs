//! Run command implementation.

use super::console::{ConsoleCommander, ConsoleReporter};
use super::output::{JsonGameResult, format_text};
use super::{CliError, OutputFormat, VictoryArg};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::PathBuf;
use tracing::info;
use zrush::game::{ConfiguredRule, RandomDice};
use zrush::{GameConfig, GameState, TurnEngine};

const BANNER: &str = "=== ZRush ===\n\n-------------\n";

/// Options gathered from the command line.
#[derive(Debug)]
pub(crate) struct RunOptions {
    pub(crate) players: Option<usize>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) seed: Option<u64>,
    pub(crate) max_rounds: Option<u32>,
    pub(crate) victory: Option<VictoryArg>,
    pub(crate) format: OutputFormat,
    pub(crate) quiet: bool,
}

/// Execute a console game.
///
/// # Errors
///
/// Returns an error if setup is rejected or input runs out mid-game.
pub(crate) fn execute(options: &RunOptions) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut commander = ConsoleCommander::new(stdin.lock(), io::stdout());

    if !options.quiet {
        commander.say(BANNER)?;
    }

    let mut config = match &options.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(players) = options.players {
        config.players = players;
    } else if options.config.is_none() {
        config.players = commander
            .ask_player_count()?
            .ok_or_else(|| CliError::new("could not read input: expected a number of players"))?;
    }
    if let Some(max_rounds) = options.max_rounds {
        config.max_rounds = Some(max_rounds);
    }
    if let Some(victory) = options.victory {
        config.victory = victory.into();
    }

    let state = GameState::new(&config)?;

    // Generate seed if not provided
    let seed = options.seed.unwrap_or_else(rand::random);
    info!(seed, players = config.players, "starting game");

    let mut reporter = ConsoleReporter::new(io::stdout());
    let mut engine = TurnEngine::new(
        state,
        commander,
        &mut reporter,
        RandomDice::new(StdRng::seed_from_u64(seed)),
        ConfiguredRule::from_config(&config),
    );
    let outcome = engine.run()?;
    let state = engine.into_state();
    reporter.finish()?;

    match options.format {
        OutputFormat::Text => {
            print!("{}", format_text(seed, &outcome, &state));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonGameResult::new(seed, &outcome, &state))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
