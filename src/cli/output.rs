//! Output formatting for the final report.

use std::collections::BTreeMap;

use serde::Serialize;
use zrush::game::EndReason;
use zrush::{GameState, Outcome, PlayerId, UnitKind};

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Random seed used for dice.
    pub(super) seed: u64,
    /// Winner player ID (null if draw).
    pub(super) winner: Option<PlayerId>,
    /// Round the game ended in.
    pub(super) rounds: u32,
    /// What ended the game.
    pub(super) reason: EndReason,
    /// Per-player results.
    pub(super) players: Vec<JsonPlayerResult>,
}

/// JSON-serializable player result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerResult {
    /// Player ID (1-8).
    pub(super) id: PlayerId,
    /// Final base health.
    pub(super) health: i32,
    /// Final mineral stock.
    pub(super) minerals: u32,
    /// Final gas stock.
    pub(super) gas: u32,
    /// Owned units by kind (zero counts omitted).
    pub(super) units: BTreeMap<UnitKind, u32>,
}

impl JsonGameResult {
    /// Create from the outcome and final state.
    pub(super) fn new(seed: u64, outcome: &Outcome, state: &GameState) -> Self {
        Self {
            seed,
            winner: outcome.winner,
            rounds: outcome.rounds,
            reason: outcome.reason,
            players: state
                .players
                .iter()
                .map(|p| JsonPlayerResult {
                    id: p.id,
                    health: p.base_health,
                    minerals: p.minerals,
                    gas: p.gas,
                    units: p.units.entries().filter(|&(_, n)| n > 0).collect(),
                })
                .collect(),
        }
    }
}

/// Format the final report as human-readable text.
pub(super) fn format_text(seed: u64, outcome: &Outcome, state: &GameState) -> String {
    let mut output = String::new();

    output.push_str(&format!("\nGame Over (seed: {seed})\n"));
    match outcome.winner {
        Some(winner) => output.push_str(&format!("  Winner: Player {winner}\n")),
        None => output.push_str("  Winner: Draw\n"),
    }
    let reason = match outcome.reason {
        EndReason::LastStanding => "last base standing",
        EndReason::RoundLimit => "round limit",
    };
    output.push_str(&format!("  Rounds: {} ({reason})\n\n", outcome.rounds));

    for player in &state.players {
        output.push_str(&format!(
            "  Player {}: {} health, {} minerals, {} gas, {}\n",
            player.id, player.base_health, player.minerals, player.gas, player.units
        ));
    }

    output
}
