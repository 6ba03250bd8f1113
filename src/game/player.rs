//! Player state management.

use std::collections::VecDeque;

use crate::game::{AttackRecord, Cost, Harvest, UnitCounts, UnitKind};

/// Unique identifier for a player (1-based).
pub type PlayerId = u8;

/// Base health every player starts with.
pub const STARTING_HEALTH: i32 = 20;

/// Drones every player starts with.
pub const STARTING_DRONES: u32 = 2;

/// State for a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Unique identifier for this player.
    pub id: PlayerId,
    /// Base health. Not floored at zero.
    pub base_health: i32,
    /// Mineral stock.
    pub minerals: u32,
    /// Vespene gas stock.
    pub gas: u32,
    /// Owned units per kind.
    pub units: UnitCounts,
    /// Attacks queued against this player, oldest first.
    incoming: VecDeque<AttackRecord>,
}

impl Player {
    /// Create a new player with the standard starting values.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self::with_start(id, STARTING_HEALTH, STARTING_DRONES)
    }

    /// Create a new player with explicit starting health and drones.
    #[must_use]
    pub fn with_start(id: PlayerId, base_health: i32, drones: u32) -> Self {
        Self {
            id,
            base_health,
            minerals: 0,
            gas: 0,
            units: UnitCounts::new().with(UnitKind::Drone, drones),
            incoming: VecDeque::new(),
        }
    }

    /// Number of drones, i.e. resource slots to fill this turn.
    #[must_use]
    pub fn drones(&self) -> u32 {
        self.units[UnitKind::Drone]
    }

    /// Current mineral and gas stock.
    #[must_use]
    pub const fn stock(&self) -> Cost {
        Cost::new(self.minerals, self.gas)
    }

    /// Credit a harvest to the stock.
    pub fn deposit(&mut self, harvest: Harvest) {
        self.minerals = self.minerals.saturating_add(harvest.minerals);
        self.gas = self.gas.saturating_add(harvest.gas);
    }

    /// Owned units that can be committed to an attack.
    #[must_use]
    pub fn offensive_units(&self) -> UnitCounts {
        self.units.offensive()
    }

    /// Whether the player owns at least one offensive unit.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        !self.offensive_units().is_empty()
    }

    /// Whether the base is still above zero health.
    #[must_use]
    pub const fn is_standing(&self) -> bool {
        self.base_health > 0
    }

    /// Subtract damage from base health.
    pub fn take_damage(&mut self, damage: u32) {
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        self.base_health = self.base_health.saturating_sub(damage);
    }

    /// Append an attack to the back of the pending queue.
    pub fn enqueue_attack(&mut self, record: AttackRecord) {
        self.incoming.push_back(record);
    }

    /// Attacks waiting to be resolved on this player's next turn.
    #[must_use]
    pub const fn pending_attacks(&self) -> &VecDeque<AttackRecord> {
        &self.incoming
    }

    /// Remove and return every pending attack, leaving the queue empty.
    pub(crate) fn drain_attacks(&mut self) -> VecDeque<AttackRecord> {
        std::mem::take(&mut self.incoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new(1);
        assert_eq!(player.id, 1);
        assert_eq!(player.base_health, 20);
        assert_eq!(player.stock(), Cost::new(0, 0));
        assert_eq!(player.drones(), 2);
        assert_eq!(player.units.total(), 2);
        assert!(player.pending_attacks().is_empty());
    }

    #[test]
    fn test_player_deposit() {
        let mut player = Player::new(1);
        player.deposit(Harvest::new(3, 1));
        player.deposit(Harvest::new(1, 0));
        assert_eq!(player.stock(), Cost::new(4, 1));
    }

    #[test]
    fn test_player_can_attack() {
        let mut player = Player::new(1);
        assert!(!player.can_attack());

        player.units[UnitKind::SporeCrawler] = 3;
        assert!(!player.can_attack());

        player.units[UnitKind::Mutalisk] = 1;
        assert!(player.can_attack());
    }

    #[test]
    fn test_player_damage_goes_negative() {
        let mut player = Player::new(1);
        player.take_damage(25);
        assert_eq!(player.base_health, -5);
        assert!(!player.is_standing());

        player.take_damage(u32::MAX);
        assert_eq!(player.base_health, i32::MIN);
    }

    #[test]
    fn test_player_drain_attacks() {
        let mut player = Player::new(2);
        let record = AttackRecord::new(1, UnitCounts::new().with(UnitKind::Zergling, 1));
        player.enqueue_attack(record);
        player.enqueue_attack(record);
        assert_eq!(player.pending_attacks().len(), 2);

        let drained = player.drain_attacks();
        assert_eq!(drained.len(), 2);
        assert!(player.pending_attacks().is_empty());
    }
}
