//! Turn engine: drives each player through the phases of a turn.
//!
//! The engine owns the [`GameState`] and talks to the outside world through
//! three seams:
//! - a [`Commander`] that supplies raw input tokens,
//! - an [`Observer`] that is told what happened,
//! - a [`DiceRoller`] for the one random draw per resource phase.
//!
//! Token validation and re-prompting happen here, so a `Commander` only has
//! to hand back whatever the player typed.

use tracing::{debug, info};

use crate::error::{GameResult, InputError};
use crate::game::{
    AttackRecord, Cost, DefenseReport, Dice, DiceRoller, GameState, Harvest, InsufficientFunds,
    MorphOrder, Outcome, Phase, Player, PlayerId, Slot, SlotAssignment, TerminationRule,
    UnitCounts, UnitKind, affordable_units, apply_morph, commit_attack, generate_resources,
    resolve_defense,
};

/// Supplies raw input tokens for the active player.
///
/// Every method may be called repeatedly in one phase when the previous
/// token was rejected.
pub trait Commander {
    /// A resource slot for the next drone. `remaining` drones are still
    /// unassigned.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if no token can be produced.
    fn slot_token(&mut self, player: &Player, remaining: u32) -> Result<String, InputError>;

    /// A compact unit string to morph, or the skip token.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if no token can be produced.
    fn morph_order(&mut self, player: &Player) -> Result<String, InputError>;

    /// A compact unit string to commit to an attack.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if no token can be produced.
    fn attack_order(&mut self, player: &Player) -> Result<String, InputError>;

    /// The id of the player to attack.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if no token can be produced.
    fn attack_target(&mut self, player: &Player, player_count: usize)
    -> Result<String, InputError>;
}

/// Something the engine reports. Purely informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A new round begins.
    RoundStarted {
        /// Round number.
        round: u32,
    },
    /// A player's turn begins.
    TurnStarted {
        /// Active player.
        player: PlayerId,
        /// Base health at the start of the turn.
        health: i32,
    },
    /// The resource phase is waiting for slot assignments.
    HarvestStarted {
        /// Active player.
        player: PlayerId,
        /// Drones to assign.
        drones: u32,
    },
    /// A slot token was not 1, 2 or 3.
    SlotRejected {
        /// Active player.
        player: PlayerId,
        /// The rejected token.
        token: String,
    },
    /// The die was rolled.
    DiceRolled {
        /// Active player.
        player: PlayerId,
        /// Roll.
        dice: Dice,
    },
    /// Resources were credited.
    Harvested {
        /// Active player.
        player: PlayerId,
        /// Amount gained.
        harvest: Harvest,
    },
    /// Units the player can currently afford.
    MorphOffered {
        /// Active player.
        player: PlayerId,
        /// Current stock.
        stock: Cost,
        /// Affordable kinds.
        affordable: Vec<UnitKind>,
    },
    /// A morph request was rejected; the offer repeats.
    MorphRejected {
        /// Active player.
        player: PlayerId,
        /// Why.
        reason: InsufficientFunds,
    },
    /// A morph request was applied.
    Morphed {
        /// Active player.
        player: PlayerId,
        /// Units added.
        units: UnitCounts,
        /// Amount paid.
        cost: Cost,
    },
    /// The player skipped the morph phase.
    MorphSkipped {
        /// Active player.
        player: PlayerId,
    },
    /// A queued attack hit the active player.
    AttackResolved {
        /// Active player.
        defender: PlayerId,
        /// Who launched it.
        attacker: PlayerId,
        /// Damage taken.
        damage: u32,
    },
    /// Offensive units the player may commit.
    OffensiveRoster {
        /// Active player.
        player: PlayerId,
        /// Offensive units owned.
        units: UnitCounts,
    },
    /// A target token was invalid.
    TargetRejected {
        /// Active player.
        player: PlayerId,
        /// The rejected token.
        token: String,
    },
    /// An attack was queued on its target.
    AttackQueued {
        /// Target.
        target: PlayerId,
        /// The queued attack.
        record: AttackRecord,
    },
    /// The termination rule ended the game.
    GameOver(Outcome),
}

/// Receives [`GameEvent`]s as the game runs.
pub trait Observer {
    /// Handle one event.
    fn notify(&mut self, event: &GameEvent);
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn notify(&mut self, _event: &GameEvent) {}
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn notify(&mut self, event: &GameEvent) {
        (**self).notify(event);
    }
}

/// Runs turns in round-robin order until the termination rule fires.
#[derive(Debug)]
pub struct TurnEngine<C, O, D, T> {
    state: GameState,
    commander: C,
    observer: O,
    dice: D,
    rule: T,
}

impl<C, O, D, T> TurnEngine<C, O, D, T>
where
    C: Commander,
    O: Observer,
    D: DiceRoller,
    T: TerminationRule,
{
    /// Create an engine around an initial state.
    pub fn new(state: GameState, commander: C, observer: O, dice: D, rule: T) -> Self {
        Self {
            state,
            commander,
            observer,
            dice,
            rule,
        }
    }

    /// Current game state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the engine, returning the final state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Play turns until the termination rule reports an outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`](crate::error::GameError) if the commander
    /// fails to produce input.
    pub fn run(&mut self) -> GameResult<Outcome> {
        loop {
            if let Some(outcome) = self.play_turn()? {
                return Ok(outcome);
            }
        }
    }

    /// Play the active player's turn and pass play on.
    ///
    /// Returns the outcome if the termination rule ended the game at the
    /// end of this turn; play is not advanced in that case.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`](crate::error::GameError) if the commander
    /// fails to produce input.
    pub fn play_turn(&mut self) -> GameResult<Option<Outcome>> {
        let mut phase = Phase::RoundStart;
        loop {
            match phase {
                Phase::RoundStart => self.start_turn(),
                Phase::Resources => self.resource_phase()?,
                Phase::Evolve => {}
                Phase::Morph => self.morph_phase()?,
                Phase::Defend => self.defend_phase(),
                Phase::Attack => self.attack_phase()?,
                Phase::TurnEnd => return Ok(self.end_turn()),
            }
            phase = phase.next();
        }
    }

    fn start_turn(&mut self) {
        let cursor = self.state.cursor;
        if cursor.starts_round() {
            info!(round = cursor.round, "round started");
            self.observer
                .notify(&GameEvent::RoundStarted { round: cursor.round });
        }

        let player = self.state.active_player();
        info!(player = player.id, health = player.base_health, "turn started");
        self.observer.notify(&GameEvent::TurnStarted {
            player: player.id,
            health: player.base_health,
        });
    }

    fn resource_phase(&mut self) -> Result<(), InputError> {
        let player = self.state.active_player();
        let id = player.id;
        let drones = player.drones();
        self.observer
            .notify(&GameEvent::HarvestStarted { player: id, drones });

        let mut assignment = SlotAssignment::default();
        let mut remaining = drones;
        while remaining > 0 {
            let token = self.commander.slot_token(player, remaining)?;
            if let Some(slot) = Slot::parse(&token) {
                assignment.assign(slot);
                remaining -= 1;
            } else {
                debug!(player = id, %token, "rejected resource slot");
                self.observer
                    .notify(&GameEvent::SlotRejected { player: id, token });
            }
        }

        let dice = self.dice.roll();
        debug!(player = id, dice = dice.value(), "dice rolled");
        self.observer
            .notify(&GameEvent::DiceRolled { player: id, dice });

        let harvest = generate_resources(&assignment, dice);
        debug!(
            player = id,
            minerals = harvest.minerals,
            gas = harvest.gas,
            "harvested"
        );
        self.state.active_player_mut().deposit(harvest);
        self.observer
            .notify(&GameEvent::Harvested { player: id, harvest });
        Ok(())
    }

    fn morph_phase(&mut self) -> Result<(), InputError> {
        loop {
            let player = self.state.active_player();
            let id = player.id;
            let affordable = affordable_units(player);
            if affordable.is_empty() {
                return Ok(());
            }
            self.observer.notify(&GameEvent::MorphOffered {
                player: id,
                stock: player.stock(),
                affordable,
            });

            let token = self.commander.morph_order(player)?;
            let MorphOrder::Units(order) = MorphOrder::parse(&token) else {
                self.observer.notify(&GameEvent::MorphSkipped { player: id });
                return Ok(());
            };

            match apply_morph(self.state.active_player_mut(), &order) {
                Ok(cost) => {
                    info!(player = id, units = %order, %cost, "morphed units");
                    self.observer.notify(&GameEvent::Morphed {
                        player: id,
                        units: order,
                        cost,
                    });
                    return Ok(());
                }
                Err(reason) => {
                    debug!(player = id, %reason, "morph rejected");
                    self.observer
                        .notify(&GameEvent::MorphRejected { player: id, reason });
                }
            }
        }
    }

    fn defend_phase(&mut self) {
        let defender = self.state.active_player_mut();
        let id = defender.id;
        let report: DefenseReport = resolve_defense(defender);
        for hit in &report.resolved {
            info!(
                defender = id,
                attacker = hit.attacker,
                damage = hit.damage,
                "attack resolved"
            );
            self.observer.notify(&GameEvent::AttackResolved {
                defender: id,
                attacker: hit.attacker,
                damage: hit.damage,
            });
        }
    }

    fn attack_phase(&mut self) -> Result<(), InputError> {
        let player_count = self.state.player_count();
        let player = self.state.active_player();
        if !player.can_attack() {
            return Ok(());
        }
        let id = player.id;
        self.observer.notify(&GameEvent::OffensiveRoster {
            player: id,
            units: player.offensive_units(),
        });

        let token = self.commander.attack_order(player)?;
        let record = commit_attack(player, &UnitCounts::parse_compact(&token));

        let target = loop {
            let token = self.commander.attack_target(player, player_count)?;
            if let Some(target) = self.state.parse_target(id, &token) {
                break target;
            }
            debug!(player = id, %token, "rejected attack target");
            self.observer
                .notify(&GameEvent::TargetRejected { player: id, token });
        };

        info!(
            attacker = id,
            target,
            units = %record.units,
            damage = record.damage(),
            "attack queued"
        );
        self.state.queue_attack(target, record);
        self.observer
            .notify(&GameEvent::AttackQueued { target, record });
        Ok(())
    }

    fn end_turn(&mut self) -> Option<Outcome> {
        if let Some(outcome) = self.rule.check(&self.state) {
            info!(
                winner = ?outcome.winner,
                rounds = outcome.rounds,
                reason = ?outcome.reason,
                "game over"
            );
            self.observer.notify(&GameEvent::GameOver(outcome));
            return Some(outcome);
        }
        self.state.advance_turn();
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::config::GameConfig;
    use crate::game::{Endless, RoundLimit};

    /// Commander that replays a fixed list of tokens.
    #[derive(Debug, Default)]
    struct Script(VecDeque<&'static str>);

    impl Script {
        fn new(tokens: &[&'static str]) -> Self {
            Self(tokens.iter().copied().collect())
        }

        fn pop(&mut self) -> Result<String, InputError> {
            self.0
                .pop_front()
                .map(str::to_owned)
                .ok_or(InputError::Closed)
        }
    }

    impl Commander for Script {
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

    #[derive(Debug)]
    struct Fixed(VecDeque<u8>);

    impl DiceRoller for Fixed {
        fn roll(&mut self) -> Dice {
            self.0.pop_front().and_then(Dice::new).unwrap()
        }
    }

    #[derive(Debug, Default)]
    struct Recorder(Vec<GameEvent>);

    impl Observer for Recorder {
        fn notify(&mut self, event: &GameEvent) {
            self.0.push(event.clone());
        }
    }

    fn two_player_state() -> GameState {
        GameState::new(&GameConfig::default()).unwrap()
    }

    #[test]
    fn test_resource_phase_reprompts_invalid_slots() {
        let mut recorder = Recorder::default();
        let mut engine = TurnEngine::new(
            two_player_state(),
            Script::new(&["0", "1", "abc", "1", "d"]),
            &mut recorder,
            Fixed(VecDeque::from([4])),
            Endless,
        );
        // Morphing a drone ends the phase; there is nothing to attack with.
        let outcome = engine.play_turn().unwrap();
        assert!(outcome.is_none());

        let player = &engine.state().players[0];
        assert_eq!(player.stock(), Cost::new(2, 0));
        assert_eq!(player.drones(), 3);
        assert_eq!(engine.state().cursor.active, 1);

        let rejected = recorder
            .0
            .iter()
            .filter(|e| matches!(e, GameEvent::SlotRejected { .. }))
            .count();
        assert_eq!(rejected, 2);
    }

    #[test]
    fn test_morph_phase_retries_after_insufficient_funds() {
        let mut recorder = Recorder::default();
        let mut engine = TurnEngine::new(
            two_player_state(),
            Script::new(&["1", "1", "h", "zzzz", "zz", "z", "2"]),
            &mut recorder,
            Fixed(VecDeque::from([1])),
            Endless,
        );
        engine.play_turn().unwrap();

        let state = engine.into_state();
        let player = &state.players[0];
        assert_eq!(player.units[UnitKind::Zergling], 2);
        assert_eq!(player.units[UnitKind::Hydralisk], 0);
        assert_eq!(player.stock(), Cost::new(1, 0));
        assert_eq!(state.players[1].pending_attacks().len(), 1);

        let rejected = recorder
            .0
            .iter()
            .filter(|e| matches!(e, GameEvent::MorphRejected { .. }))
            .count();
        assert_eq!(rejected, 2);
    }

    #[test]
    fn test_morph_skip_keeps_stock() {
        let mut engine = TurnEngine::new(
            two_player_state(),
            Script::new(&["2", "2", "x"]),
            NullObserver,
            Fixed(VecDeque::from([2])),
            Endless,
        );
        engine.play_turn().unwrap();
        assert_eq!(engine.state().players[0].stock(), Cost::new(3, 0));
    }

    #[test]
    fn test_input_failure_aborts_turn() {
        let mut engine = TurnEngine::new(
            two_player_state(),
            Script::new(&["1"]),
            NullObserver,
            Fixed(VecDeque::new()),
            Endless,
        );
        let err = engine.play_turn().unwrap_err();
        assert!(matches!(
            err,
            crate::error::GameError::Input(InputError::Closed)
        ));
        assert_eq!(engine.state().cursor.active, 0);
    }

    #[test]
    fn test_attack_reprompts_target_and_queues() {
        let mut state = two_player_state();
        state.players[0].units[UnitKind::Zergling] = 2;

        let mut recorder = Recorder::default();
        let mut engine = TurnEngine::new(
            state,
            // dice 3 with both drones on slot one: nothing harvested, nothing affordable
            Script::new(&["1", "1", "zzz", "1", "9", "2"]),
            &mut recorder,
            Fixed(VecDeque::from([3])),
            Endless,
        );
        engine.play_turn().unwrap();

        let queue = engine.state().players[1].pending_attacks();
        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue[0],
            AttackRecord::new(1, UnitCounts::new().with(UnitKind::Zergling, 2))
        );
        let rejected = recorder
            .0
            .iter()
            .filter(|e| matches!(e, GameEvent::TargetRejected { .. }))
            .count();
        assert_eq!(rejected, 2);
    }

    #[test]
    fn test_round_limit_stops_run() {
        let mut engine = TurnEngine::new(
            two_player_state(),
            Script::new(&["1", "1", "1", "1"]),
            NullObserver,
            Fixed(VecDeque::from([3, 3])),
            RoundLimit(1),
        );
        let outcome = engine.run().unwrap();
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.winner, None);
        assert_eq!(engine.state().cursor.active, 1);
    }

    #[test]
    fn test_events_in_phase_order() {
        let mut recorder = Recorder::default();
        let mut engine = TurnEngine::new(
            two_player_state(),
            Script::new(&["1", "3", "x"]),
            &mut recorder,
            Fixed(VecDeque::from([5])),
            Endless,
        );
        engine.play_turn().unwrap();

        let kinds: Vec<&'static str> = recorder
            .0
            .iter()
            .map(|e| match e {
                GameEvent::RoundStarted { .. } => "round",
                GameEvent::TurnStarted { .. } => "turn",
                GameEvent::HarvestStarted { .. } => "harvest-start",
                GameEvent::DiceRolled { .. } => "dice",
                GameEvent::Harvested { .. } => "harvest",
                GameEvent::MorphOffered { .. } => "offer",
                GameEvent::MorphSkipped { .. } => "skip",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "round",
                "turn",
                "harvest-start",
                "dice",
                "harvest",
                "offer",
                "skip"
            ]
        );
    }
}
