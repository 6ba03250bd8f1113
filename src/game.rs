//! Game layer for ZRush.
//!
//! Implements the rules of a turn:
//! - Unit catalog and unit counts
//! - Players with base health, resources and a pending-attack queue
//! - Resource generation (drone slots and a die roll)
//! - Morph economy (buying units)
//! - Attack commitment and defend resolution
//! - Turn engine driving the phases in round-robin order

mod combat;
mod economy;
mod engine;
mod harvest;
mod player;
mod rules;
mod state;
mod unit;

pub use combat::{AttackRecord, DefenseReport, ResolvedAttack, commit_attack, resolve_defense};
pub use economy::{InsufficientFunds, MorphOrder, SKIP_TOKEN, affordable_units, apply_morph};
pub use engine::{Commander, GameEvent, NullObserver, Observer, TurnEngine};
pub use harvest::{
    Dice, DiceRoller, Harvest, RandomDice, Resource, Slot, SlotAssignment, cluster_yield,
    generate_resources,
};
pub use player::{Player, PlayerId, STARTING_DRONES, STARTING_HEALTH};
pub use rules::{ConfiguredRule, EndReason, Endless, LastStanding, Outcome, RoundLimit, TerminationRule};
pub use state::{GameState, MAX_PLAYERS, Phase, TurnCursor};
pub use unit::{Cost, UNIT_KIND_COUNT, UnitCounts, UnitKind, UnitStats};
