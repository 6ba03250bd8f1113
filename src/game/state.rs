//! Game state management.

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::game::{AttackRecord, Player, PlayerId};

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 8;

/// Phases of a single player's turn, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Turn (and possibly round) begins.
    RoundStart,
    /// Drones are assigned and the die is rolled.
    Resources,
    /// Reserved; nothing happens here yet.
    Evolve,
    /// Units are bought.
    Morph,
    /// Queued attacks against this player resolve.
    Defend,
    /// This player may queue an attack on someone else.
    Attack,
    /// Termination is checked and play passes on.
    TurnEnd,
}

impl Phase {
    /// The phase that follows this one. `TurnEnd` wraps to `RoundStart`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Phase::RoundStart => Phase::Resources,
            Phase::Resources => Phase::Evolve,
            Phase::Evolve => Phase::Morph,
            Phase::Morph => Phase::Defend,
            Phase::Defend => Phase::Attack,
            Phase::Attack => Phase::TurnEnd,
            Phase::TurnEnd => Phase::RoundStart,
        }
    }
}

/// Whose turn it is and which round it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnCursor {
    /// Index of the active player in the player list.
    pub active: usize,
    /// Current round, starting at 1.
    pub round: u32,
}

impl TurnCursor {
    /// The first turn of the first round.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            active: 0,
            round: 1,
        }
    }

    /// The cursor after the active player's turn ends.
    ///
    /// The round advances when play wraps back to the first player.
    #[must_use]
    pub const fn advance(self, player_count: usize) -> Self {
        let next = if player_count == 0 {
            0
        } else {
            (self.active + 1) % player_count
        };
        let round = if next == 0 {
            self.round.saturating_add(1)
        } else {
            self.round
        };
        Self {
            active: next,
            round,
        }
    }

    /// Whether this turn opens a new round.
    #[must_use]
    pub const fn starts_round(self) -> bool {
        self.active == 0
    }

    /// Whether this turn is the last one of its round.
    #[must_use]
    pub const fn ends_round(self, player_count: usize) -> bool {
        self.active + 1 >= player_count
    }
}

impl Default for TurnCursor {
    fn default() -> Self {
        Self::start()
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// All players, ordered by id.
    pub players: Vec<Player>,
    /// Turn position.
    pub cursor: TurnCursor,
}

impl GameState {
    /// Set up a new game from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let players = (1..=config.players)
            .map(|id| {
                PlayerId::try_from(id)
                    .map(|id| Player::with_start(id, config.starting_health, config.starting_drones))
                    .map_err(|_| ConfigError::TooManyPlayers(config.players))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_players(players)
    }

    /// Wrap existing players, starting at round 1 with the first player.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] unless there are 2 to [`MAX_PLAYERS`]
    /// players whose ids are `1..=n` in order.
    pub fn from_players(players: Vec<Player>) -> Result<Self, ConfigError> {
        if players.len() < 2 {
            return Err(ConfigError::TooFewPlayers(players.len()));
        }
        if players.len() > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(players.len()));
        }
        for (position, player) in (1..).zip(&players) {
            if usize::from(player.id) != position {
                return Err(ConfigError::PlayerOrder {
                    position,
                    id: player.id,
                });
            }
        }
        Ok(Self {
            players,
            cursor: TurnCursor::start(),
        })
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Current round (1-based).
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.cursor.round
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.cursor.active]
    }

    /// Mutable access to the player whose turn it is.
    pub fn active_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.cursor.active]
    }

    /// Get a player by ID.
    #[must_use]
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Get a mutable reference to a player by ID.
    #[must_use]
    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Parse a target token for `attacker`.
    ///
    /// Valid targets are numeric, within `1..=player_count`, and not the
    /// attacker itself.
    #[must_use]
    pub fn parse_target(&self, attacker: PlayerId, token: &str) -> Option<PlayerId> {
        let id = token.trim().parse::<PlayerId>().ok()?;
        (id != attacker && self.get_player(id).is_some()).then_some(id)
    }

    /// Queue an attack on `target`. Returns `false` if no such player exists.
    pub fn queue_attack(&mut self, target: PlayerId, record: AttackRecord) -> bool {
        match self.get_player_mut(target) {
            Some(defender) => {
                defender.enqueue_attack(record);
                true
            }
            None => false,
        }
    }

    /// Pass play to the next player.
    pub fn advance_turn(&mut self) {
        self.cursor = self.cursor.advance(self.players.len());
    }

    /// Players whose base is still above zero health.
    pub fn standing_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_standing())
    }
}
