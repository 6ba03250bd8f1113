//! Resource generation: drones are assigned to slots, one die decides which
//! slots pay out.
//!
//! # Yield table
//!
//! | Dice | Slot 1   | Slot 2   | Slot 3 |
//! |------|----------|----------|--------|
//! | 1    | minerals |          |        |
//! | 2    |          | minerals |        |
//! | 3    |          |          | gas    |
//! | 4    | minerals | minerals |        |
//! | 5    | minerals |          | gas    |
//! | 6    |          | minerals | gas    |
//!
//! A paying slot yields one resource per assigned drone, plus one extra when
//! two or more drones share the slot.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A resource-gathering assignment for one drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// Mineral field one.
    One,
    /// Mineral field two.
    Two,
    /// Vespene geyser.
    Three,
}

impl Slot {
    /// All slots in order.
    pub const ALL: [Slot; 3] = [Slot::One, Slot::Two, Slot::Three];

    /// The slot with the given 1-based number.
    #[must_use]
    pub const fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(Slot::One),
            2 => Some(Slot::Two),
            3 => Some(Slot::Three),
            _ => None,
        }
    }

    /// Parse an input token such as `"2"`. Anything outside 1-3 is `None`.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        token.trim().parse::<i64>().ok().and_then(Self::from_number)
    }

    /// 1-based slot number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Slot::One => 1,
            Slot::Two => 2,
            Slot::Three => 3,
        }
    }

    const fn index(self) -> usize {
        self.number() as usize - 1
    }
}

/// What an active slot produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Minerals.
    Minerals,
    /// Vespene gas.
    Gas,
}

/// A die result in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dice(u8);

impl Dice {
    /// Number of faces.
    pub const FACES: u8 = 6;

    /// Wrap a face value; `None` outside `1..=6`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= Self::FACES {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Roll a fair die.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(1..=Self::FACES))
    }

    /// Face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// What `slot` yields on this roll, if anything.
    #[must_use]
    pub const fn yield_of(self, slot: Slot) -> Option<Resource> {
        let pays = match slot {
            Slot::One => matches!(self.0, 1 | 4 | 5),
            Slot::Two => matches!(self.0, 2 | 4 | 6),
            Slot::Three => matches!(self.0, 3 | 5 | 6),
        };
        if !pays {
            return None;
        }
        match slot {
            Slot::One | Slot::Two => Some(Resource::Minerals),
            Slot::Three => Some(Resource::Gas),
        }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of dice rolls for the resource phase.
pub trait DiceRoller {
    /// Produce the next roll.
    fn roll(&mut self) -> Dice;
}

/// [`DiceRoller`] backed by a random number generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    /// Wrap a random number generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DiceRoller for RandomDice<R> {
    fn roll(&mut self) -> Dice {
        Dice::roll(&mut self.rng)
    }
}

/// Number of drones assigned to each slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SlotAssignment([u32; 3]);

impl SlotAssignment {
    /// Assign one more drone to `slot`.
    pub fn assign(&mut self, slot: Slot) {
        let count = &mut self.0[slot.index()];
        *count = count.saturating_add(1);
    }

    /// Drones assigned to `slot`.
    #[must_use]
    pub const fn count(&self, slot: Slot) -> u32 {
        self.0[slot.index()]
    }

    /// Total drones assigned.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, &n| acc.saturating_add(n))
    }
}

impl FromIterator<Slot> for SlotAssignment {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut assignment = Self::default();
        for slot in iter {
            assignment.assign(slot);
        }
        assignment
    }
}

/// Minerals and gas gained in one resource phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Harvest {
    /// Minerals gained.
    pub minerals: u32,
    /// Gas gained.
    pub gas: u32,
}

impl Harvest {
    /// Create a harvest.
    #[must_use]
    pub const fn new(minerals: u32, gas: u32) -> Self {
        Self { minerals, gas }
    }
}

/// Yield of a paying slot holding `count` drones.
///
/// Linear in `count`, with one bonus resource once two or more drones share
/// the slot.
#[must_use]
pub const fn cluster_yield(count: u32) -> u32 {
    if count > 1 {
        count.saturating_add(1)
    } else {
        count
    }
}

/// Compute the harvest for a slot assignment and a die roll.
#[must_use]
pub fn generate_resources(assignment: &SlotAssignment, dice: Dice) -> Harvest {
    let mut harvest = Harvest::default();
    for slot in Slot::ALL {
        let Some(resource) = dice.yield_of(slot) else {
            continue;
        };
        let amount = cluster_yield(assignment.count(slot));
        match resource {
            Resource::Minerals => harvest.minerals = harvest.minerals.saturating_add(amount),
            Resource::Gas => harvest.gas = harvest.gas.saturating_add(amount),
        }
    }
    harvest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dice(value: u8) -> Dice {
        Dice::new(value).unwrap()
    }

    fn one_each() -> SlotAssignment {
        [Slot::One, Slot::Two, Slot::Three].into_iter().collect()
    }

    #[test]
    fn test_slot_parse() {
        assert_eq!(Slot::parse("1"), Some(Slot::One));
        assert_eq!(Slot::parse(" 3 "), Some(Slot::Three));
        assert_eq!(Slot::parse("0"), None);
        assert_eq!(Slot::parse("4"), None);
        assert_eq!(Slot::parse("-1"), None);
        assert_eq!(Slot::parse("two"), None);
    }

    #[test]
    fn test_dice_bounds() {
        assert!(Dice::new(0).is_none());
        assert!(Dice::new(7).is_none());
        for value in 1..=6 {
            assert_eq!(dice(value).value(), value);
        }
    }

    #[test]
    fn test_dice_roll_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let roll = Dice::roll(&mut rng).value();
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn test_yield_table() {
        let expected = [
            (1, Harvest::new(1, 0)),
            (2, Harvest::new(1, 0)),
            (3, Harvest::new(0, 1)),
            (4, Harvest::new(2, 0)),
            (5, Harvest::new(1, 1)),
            (6, Harvest::new(1, 1)),
        ];
        for (value, harvest) in expected {
            assert_eq!(
                generate_resources(&one_each(), dice(value)),
                harvest,
                "dice {value}"
            );
        }
    }

    #[test]
    fn test_inactive_slot_yields_nothing() {
        let all_on_three: SlotAssignment = [Slot::Three; 4].into_iter().collect();
        for value in [1, 2, 4] {
            assert_eq!(
                generate_resources(&all_on_three, dice(value)),
                Harvest::default()
            );
        }
    }

    #[test]
    fn test_cluster_yield() {
        assert_eq!(cluster_yield(0), 0);
        assert_eq!(cluster_yield(1), 1);
        assert_eq!(cluster_yield(2), 3);
        assert_eq!(cluster_yield(5), 6);
    }

    #[test]
    fn test_two_drones_on_slot_one_with_four() {
        let both_on_one: SlotAssignment = [Slot::One, Slot::One].into_iter().collect();
        assert_eq!(
            generate_resources(&both_on_one, dice(4)),
            Harvest::new(3, 0)
        );
    }

    #[test]
    fn test_bonus_applies_per_slot() {
        let assignment: SlotAssignment =
            [Slot::Two, Slot::Two, Slot::Three, Slot::Three, Slot::Three]
                .into_iter()
                .collect();
        assert_eq!(assignment.total(), 5);
        assert_eq!(
            generate_resources(&assignment, dice(6)),
            Harvest::new(3, 4)
        );
    }

    #[test]
    fn test_random_dice_roller() {
        let mut roller = RandomDice::new(StdRng::seed_from_u64(7));
        let mut other = RandomDice::new(StdRng::seed_from_u64(7));
        for _ in 0..20 {
            assert_eq!(roller.roll(), other.roll());
        }
    }
}
