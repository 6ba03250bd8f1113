//! Combat: committing attacks and resolving them on the defender's turn.
//!
//! Attacks never resolve immediately. A committed [`AttackRecord`] is queued
//! on the target and only applied when the target next reaches its defend
//! phase, in the order the attacks arrived.

use crate::game::{Player, PlayerId, UnitCounts};

/// An attack that has been committed but not yet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRecord {
    /// Who launched the attack.
    pub attacker: PlayerId,
    /// Committed offensive units.
    pub units: UnitCounts,
}

impl AttackRecord {
    /// Create an attack record.
    #[must_use]
    pub const fn new(attacker: PlayerId, units: UnitCounts) -> Self {
        Self { attacker, units }
    }

    /// Damage this attack deals when resolved.
    #[must_use]
    pub fn damage(&self) -> u32 {
        self.units.damage()
    }
}

/// Build an attack from a requested commitment.
///
/// Only offensive kinds are kept, and each is clamped to what the attacker
/// owns. Over-asking is not an error. The attacker's units are not consumed.
#[must_use]
pub fn commit_attack(attacker: &Player, requested: &UnitCounts) -> AttackRecord {
    let units = requested
        .offensive()
        .clamped_to(&attacker.offensive_units());
    AttackRecord::new(attacker.id, units)
}

/// One resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAttack {
    /// Who launched the attack.
    pub attacker: PlayerId,
    /// Damage applied.
    pub damage: u32,
}

/// Everything that happened in one defend phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefenseReport {
    /// Resolved attacks in queue order.
    pub resolved: Vec<ResolvedAttack>,
}

impl DefenseReport {
    /// Sum of all damage taken.
    #[must_use]
    pub fn total_damage(&self) -> u32 {
        self.resolved
            .iter()
            .fold(0u32, |acc, hit| acc.saturating_add(hit.damage))
    }
}

/// Resolve every attack queued against `defender`.
///
/// The queue is drained up front, so the snapshot taken here is exactly what
/// gets resolved. Damage is applied per attack in FIFO order with no floor.
pub fn resolve_defense(defender: &mut Player) -> DefenseReport {
    let pending = defender.drain_attacks();
    let mut report = DefenseReport {
        resolved: Vec::with_capacity(pending.len()),
    };

    for record in pending {
        let damage = record.damage();
        defender.take_damage(damage);
        report.resolved.push(ResolvedAttack {
            attacker: record.attacker,
            damage,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::UnitKind;

    fn attacker_with(zerglings: u32, hydralisks: u32, mutalisks: u32) -> Player {
        let mut player = Player::new(1);
        player.units[UnitKind::Zergling] = zerglings;
        player.units[UnitKind::Hydralisk] = hydralisks;
        player.units[UnitKind::Mutalisk] = mutalisks;
        player
    }

    #[test]
    fn test_commit_exact() {
        let attacker = attacker_with(2, 0, 0);
        let record = commit_attack(&attacker, &UnitCounts::parse_compact("zz"));
        assert_eq!(record.attacker, 1);
        assert_eq!(
            record.units,
            UnitCounts::new().with(UnitKind::Zergling, 2)
        );
        assert_eq!(record.damage(), 4);
    }

    #[test]
    fn test_commit_clamps_to_owned() {
        let attacker = attacker_with(1, 2, 0);
        let record = commit_attack(&attacker, &UnitCounts::parse_compact("zzzzhmmm"));
        assert_eq!(record.units[UnitKind::Zergling], 1);
        assert_eq!(record.units[UnitKind::Hydralisk], 1);
        assert_eq!(record.units[UnitKind::Mutalisk], 0);
    }

    #[test]
    fn test_commit_drops_non_offensive() {
        let mut attacker = attacker_with(1, 0, 0);
        attacker.units[UnitKind::SporeCrawler] = 4;
        let record = commit_attack(&attacker, &UnitCounts::parse_compact("ddssz"));
        assert_eq!(record.units, UnitCounts::new().with(UnitKind::Zergling, 1));
    }

    #[test]
    fn test_commit_does_not_consume_units() {
        let attacker = attacker_with(3, 0, 0);
        let before = attacker.units;
        let _record = commit_attack(&attacker, &UnitCounts::parse_compact("zzz"));
        assert_eq!(attacker.units, before);
    }

    #[test]
    fn test_resolve_empty_queue() {
        let mut defender = Player::new(2);
        let report = resolve_defense(&mut defender);
        assert!(report.resolved.is_empty());
        assert_eq!(report.total_damage(), 0);
        assert_eq!(defender.base_health, 20);
    }

    #[test]
    fn test_resolve_in_fifo_order() {
        let mut defender = Player::new(3);
        defender.enqueue_attack(AttackRecord::new(
            1,
            UnitCounts::new().with(UnitKind::Zergling, 2),
        ));
        defender.enqueue_attack(AttackRecord::new(
            2,
            UnitCounts::new().with(UnitKind::Mutalisk, 5),
        ));

        let report = resolve_defense(&mut defender);
        assert_eq!(
            report.resolved,
            vec![
                ResolvedAttack {
                    attacker: 1,
                    damage: 4
                },
                ResolvedAttack {
                    attacker: 2,
                    damage: 10
                },
            ]
        );
        assert_eq!(report.total_damage(), 14);
        assert_eq!(defender.base_health, 6);
        assert!(defender.pending_attacks().is_empty());
    }

    #[test]
    fn test_resolve_past_zero() {
        let mut defender = Player::new(2);
        defender.enqueue_attack(AttackRecord::new(
            1,
            UnitCounts::new().with(UnitKind::Hydralisk, 15),
        ));
        resolve_defense(&mut defender);
        assert_eq!(defender.base_health, -10);
    }
}
