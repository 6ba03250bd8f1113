#![no_main]

//! Full game turn fuzzer.
//!
//! Drives the turn engine with arbitrary player input:
//! slot choices, morph orders, attack orders and targets all come from the
//! fuzzer. The game either ends by its rules or stops when input runs out,
//! and must never panic on the way.

use std::collections::VecDeque;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;
use zrush::game::{ConfiguredRule, NullObserver, RandomDice};
use zrush::{
    Commander, GameConfig, GameError, GameState, InputError, Player, TurnEngine, VictoryRule,
};

/// Replays fuzzer tokens, then reports closed input.
struct Tokens(VecDeque<String>);

impl Tokens {
    fn pop(&mut self) -> Result<String, InputError> {
        self.0.pop_front().ok_or(InputError::Closed)
    }
}

impl Commander for Tokens {
    fn slot_token(&mut self, _: &Player, _: u32) -> Result<String, InputError> {
        self.pop()
    }
    fn morph_order(&mut self, _: &Player) -> Result<String, InputError> {
        self.pop()
    }
    fn attack_order(&mut self, _: &Player) -> Result<String, InputError> {
        self.pop()
    }
    fn attack_target(&mut self, _: &Player, _: usize) -> Result<String, InputError> {
        self.pop()
    }
}

/// Structured input for full game turn fuzzing.
#[derive(Arbitrary, Debug)]
struct GameTurnInput {
    /// Number of players (mapped into 2..=8).
    players: u8,
    /// RNG seed for dice.
    seed: u64,
    /// Round limit (mapped into 1..=10).
    max_rounds: u8,
    /// Use the last-standing victory rule.
    last_standing: bool,
    /// Everything the players type, in order.
    tokens: Vec<String>,
}

fuzz_target!(|input: GameTurnInput| {
    let config = GameConfig {
        players: usize::from(input.players % 7) + 2,
        max_rounds: Some(u32::from(input.max_rounds % 10) + 1),
        victory: if input.last_standing {
            VictoryRule::LastStanding
        } else {
            VictoryRule::Endless
        },
        ..GameConfig::default()
    };
    let Ok(state) = GameState::new(&config) else {
        panic!("valid config rejected: {config:?}");
    };

    let mut engine = TurnEngine::new(
        state,
        Tokens(input.tokens.into_iter().take(512).collect()),
        NullObserver,
        RandomDice::new(StdRng::seed_from_u64(input.seed)),
        ConfiguredRule::from_config(&config),
    );

    match engine.run() {
        Ok(outcome) => assert!(outcome.rounds <= config.max_rounds.unwrap_or(u32::MAX)),
        Err(GameError::Input(InputError::Closed)) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }

    let state = engine.state();
    for player in &state.players {
        assert!(player.base_health <= config.starting_health);
    }
    assert!(state.cursor.active < state.player_count());
});
