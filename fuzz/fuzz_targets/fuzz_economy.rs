#![no_main]

//! Morph economy fuzzer.
//!
//! Feeds arbitrary morph tokens against arbitrary stock and checks that a
//! request is either fully applied or leaves the player untouched.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zrush::game::{affordable_units, apply_morph, MorphOrder};
use zrush::{Player, UnitCounts};

/// Structured input for economy fuzzing.
#[derive(Arbitrary, Debug)]
struct EconomyInput {
    /// Mineral stock.
    minerals: u32,
    /// Gas stock.
    gas: u32,
    /// Raw morph token as a player would type it.
    token: String,
}

fuzz_target!(|input: EconomyInput| {
    let mut player = Player::new(1);
    player.minerals = input.minerals;
    player.gas = input.gas;
    let before = player.clone();

    // Every offered kind must actually be affordable on its own.
    for kind in affordable_units(&player) {
        let single = UnitCounts::new().with(kind, 1);
        let mut probe = player.clone();
        assert!(apply_morph(&mut probe, &single).is_ok(), "offered {kind} but rejected it");
    }

    let MorphOrder::Units(order) = MorphOrder::parse(&input.token) else {
        return;
    };
    assert!(
        order.total() <= u32::try_from(input.token.chars().count()).unwrap_or(u32::MAX),
        "parsed more units than letters"
    );

    match apply_morph(&mut player, &order) {
        Ok(cost) => {
            assert_eq!(player.minerals, before.minerals - cost.minerals);
            assert_eq!(player.gas, before.gas - cost.gas);
            assert_eq!(player.units.total(), before.units.total() + order.total());
        }
        Err(rejected) => {
            assert_eq!(player, before, "rejected morph modified the player");
            assert!(!rejected.available.covers(rejected.required));
        }
    }
});
