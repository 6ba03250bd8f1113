//! Game configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{MAX_PLAYERS, STARTING_DRONES, STARTING_HEALTH};

/// When a game counts as won.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VictoryRule {
    /// No victory check; only a round limit (if any) ends the game.
    #[default]
    Endless,
    /// The game ends once at most one base is above zero health.
    LastStanding,
}

/// Configuration for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of players.
    pub players: usize,
    /// Base health each player starts with.
    pub starting_health: i32,
    /// Drones each player starts with.
    pub starting_drones: u32,
    /// Stop after this many complete rounds.
    pub max_rounds: Option<u32>,
    /// Victory condition checked at the end of every turn.
    pub victory: VictoryRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 2,
            starting_health: STARTING_HEALTH,
            starting_drones: STARTING_DRONES,
            max_rounds: None,
            victory: VictoryRule::default(),
        }
    }
}

impl GameConfig {
    /// Default configuration for `players` players.
    #[must_use]
    pub fn for_players(players: usize) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    /// Check the configuration before any turn runs.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for fewer than 2 or more than
    /// [`MAX_PLAYERS`] players, non-positive starting health, or a round
    /// limit of zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < 2 {
            return Err(ConfigError::TooFewPlayers(self.players));
        }
        if self.players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(self.players));
        }
        if self.starting_health <= 0 {
            return Err(ConfigError::NonPositiveHealth(self.starting_health));
        }
        if self.max_rounds == Some(0) {
            return Err(ConfigError::ZeroRoundLimit);
        }
        Ok(())
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not a valid configuration.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
