//! Error types for the game engine.

use std::path::PathBuf;

use crate::game::{MAX_PLAYERS, PlayerId};

/// The input collaborator could not produce a token.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Input ended before a token was available.
    #[error("could not read input: end of input")]
    Closed,
    /// Reading from the underlying source failed.
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),
}

/// The game could not be set up.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Fewer than two players.
    #[error("cannot start a game with less than 2 players (got {0})")]
    TooFewPlayers(usize),
    /// More players than ids are available for.
    #[error("cannot start a game with more than {max} players (got {0})", max = MAX_PLAYERS)]
    TooManyPlayers(usize),
    /// Player ids are not `1..=n` in turn order.
    #[error("player {position} has id {id}, expected {position}")]
    PlayerOrder {
        /// 1-based position in the player list.
        position: usize,
        /// Id found at that position.
        id: PlayerId,
    },
    /// A round limit that would end the game before it starts.
    #[error("round limit must be at least 1")]
    ZeroRoundLimit,
    /// Players would start already defeated.
    #[error("starting health must be positive (got {0})")]
    NonPositiveHealth(i32),
    /// A config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// A config file was not valid JSON for [`GameConfig`](crate::config::GameConfig).
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Any error that ends a game run.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Input acquisition failed mid-game.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Setup was rejected before the first turn.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
