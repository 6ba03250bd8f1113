#![no_main]

//! Combat fuzzer.
//!
//! Commits arbitrary attack strings from arbitrary armies, queues them on a
//! defender and checks that defending applies exactly the queued damage.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zrush::game::{commit_attack, resolve_defense};
use zrush::{Player, UnitKind};

/// One attacker and its order.
#[derive(Arbitrary, Debug)]
struct Wave {
    /// Units owned by the attacker, per kind.
    owned: [u8; 5],
    /// Raw attack token.
    order: String,
}

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    /// Defender's starting base health.
    health: i16,
    /// Attacks queued before the defender's turn.
    waves: Vec<Wave>,
}

fuzz_target!(|input: CombatInput| {
    let mut defender = Player::with_start(2, i32::from(input.health), 2);
    let mut expected: i64 = 0;

    for wave in input.waves.iter().take(32) {
        let mut attacker = Player::new(1);
        for (kind, count) in UnitKind::ALL.into_iter().zip(wave.owned) {
            attacker.units[kind] = u32::from(count);
        }
        let record = commit_attack(&attacker, &zrush::UnitCounts::parse_compact(&wave.order));

        for kind in UnitKind::ALL {
            assert!(record.units[kind] <= attacker.units[kind], "committed more than owned");
            if !kind.is_offensive() {
                assert_eq!(record.units[kind], 0, "committed a non-offensive unit");
            }
        }
        expected += i64::from(record.damage());
        defender.enqueue_attack(record);
    }

    let report = resolve_defense(&mut defender);
    assert!(defender.pending_attacks().is_empty());
    assert_eq!(i64::from(report.total_damage()), expected);
    assert_eq!(
        i64::from(defender.base_health),
        i64::from(input.health) - expected
    );
});
