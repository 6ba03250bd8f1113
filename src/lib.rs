// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! ZRush: a turn-based resource-and-combat game engine.
//!
//! Each player harvests minerals and gas with a dice-driven slot mechanic,
//! morphs units with them, and launches attacks that queue up against an
//! opponent until that opponent's next turn.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Console collaborators (binary)    │
//! ├─────────────────────────────────────┤
//! │   Turn engine + termination rules   │
//! ├─────────────────────────────────────┤
//! │ Harvest │ Morph economy │ Combat    │
//! ├─────────────────────────────────────┤
//! │   Player state │ Unit catalog       │
//! └─────────────────────────────────────┘
//! ```
//!
//! The engine never reads or prints anything itself. Input arrives through
//! a [`Commander`], reporting goes out through an [`Observer`], and the die
//! comes from a [`DiceRoller`].

pub mod config;
pub mod error;
pub mod game;

pub use config::{GameConfig, VictoryRule};
pub use error::{ConfigError, GameError, GameResult, InputError};

// Re-export key game types at crate root for convenience
pub use game::{
    AttackRecord, Commander, DiceRoller, GameEvent, GameState, Observer, Outcome, Player,
    PlayerId, TerminationRule, TurnEngine, UnitCounts, UnitKind,
};
