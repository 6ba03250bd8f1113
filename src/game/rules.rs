//! End-of-turn termination rules.
//!
//! The turn engine itself never decides when a game is over. A
//! [`TerminationRule`] is consulted at the end of every turn instead.

use serde::Serialize;

use crate::config::{GameConfig, VictoryRule};
use crate::game::{GameState, PlayerId};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndReason {
    /// At most one base was left above zero health.
    LastStanding,
    /// The configured round limit was reached.
    RoundLimit,
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Outcome {
    /// The winning player (None if draw).
    pub winner: Option<PlayerId>,
    /// Round in which the game ended.
    pub rounds: u32,
    /// What ended the game.
    pub reason: EndReason,
}

/// Decides at `TurnEnd` whether the game is over.
pub trait TerminationRule {
    /// Return the outcome if the game should end now.
    fn check(&self, state: &GameState) -> Option<Outcome>;
}

/// Never ends the game.
#[derive(Debug, Clone, Copy, Default)]
pub struct Endless;

impl TerminationRule for Endless {
    fn check(&self, _state: &GameState) -> Option<Outcome> {
        None
    }
}

/// Ends the game once at most one base is above zero health.
///
/// If every base falls in the same turn the result is a draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastStanding;

impl TerminationRule for LastStanding {
    fn check(&self, state: &GameState) -> Option<Outcome> {
        let mut standing = state.standing_players();
        let first = standing.next();
        if standing.next().is_some() {
            return None;
        }
        Some(Outcome {
            winner: first.map(|p| p.id),
            rounds: state.round(),
            reason: EndReason::LastStanding,
        })
    }
}

/// Ends the game after the last turn of the given round.
///
/// The winner is the player with the highest base health; a tie is a draw.
#[derive(Debug, Clone, Copy)]
pub struct RoundLimit(pub u32);

impl TerminationRule for RoundLimit {
    fn check(&self, state: &GameState) -> Option<Outcome> {
        let cursor = state.cursor;
        if cursor.round < self.0 || !cursor.ends_round(state.player_count()) {
            return None;
        }
        Some(Outcome {
            winner: healthiest(state),
            rounds: cursor.round,
            reason: EndReason::RoundLimit,
        })
    }
}

/// Player with strictly the highest base health, if any.
fn healthiest(state: &GameState) -> Option<PlayerId> {
    let best = state.players.iter().map(|p| p.base_health).max()?;
    let mut leaders = state.players.iter().filter(|p| p.base_health == best);
    let leader = leaders.next()?;
    leaders.next().is_none().then_some(leader.id)
}

/// Rule built from a [`GameConfig`]: victory first, then the round limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredRule {
    victory: VictoryRule,
    max_rounds: Option<u32>,
}

impl ConfiguredRule {
    /// Build the rule for a configuration.
    #[must_use]
    pub const fn from_config(config: &GameConfig) -> Self {
        Self {
            victory: config.victory,
            max_rounds: config.max_rounds,
        }
    }
}

impl TerminationRule for ConfiguredRule {
    fn check(&self, state: &GameState) -> Option<Outcome> {
        let victory = match self.victory {
            VictoryRule::Endless => None,
            VictoryRule::LastStanding => LastStanding.check(state),
        };
        victory.or_else(|| self.max_rounds.and_then(|limit| RoundLimit(limit).check(state)))
    }
}
