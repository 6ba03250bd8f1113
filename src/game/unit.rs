//! Unit catalog and per-kind unit counts.
//!
//! The catalog is a fixed table indexed by [`UnitKind`]. Everything that
//! tracks "how many of each unit" goes through [`UnitCounts`], an
//! enum-indexed array, so every kind is handled exhaustively.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Number of unit kinds in the catalog.
pub const UNIT_KIND_COUNT: usize = 5;

/// A kind of unit a player can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    /// Worker unit; gathers resources, never attacks.
    Drone,
    /// Cheap melee attacker.
    Zergling,
    /// Ranged attacker that needs gas.
    Hydralisk,
    /// Flying attacker.
    Mutalisk,
    /// Static defence; never attacks.
    SporeCrawler,
}

/// Immutable catalog entry for a unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    /// Display name, singular.
    pub name: &'static str,
    /// Display name, plural.
    pub plural: &'static str,
    /// Damage dealt per committed unit.
    pub attack: u32,
    /// Defence value. Not used by combat resolution.
    pub defense: u32,
    /// Mineral cost to morph one unit.
    pub minerals: u32,
    /// Gas cost to morph one unit.
    pub gas: u32,
}

impl UnitStats {
    /// Cost of morphing a single unit of this kind.
    #[must_use]
    pub const fn cost(&self) -> Cost {
        Cost {
            minerals: self.minerals,
            gas: self.gas,
        }
    }
}

const CATALOG: [UnitStats; UNIT_KIND_COUNT] = [
    UnitStats {
        name: "Drone",
        plural: "Drones",
        attack: 0,
        defense: 3,
        minerals: 1,
        gas: 0,
    },
    UnitStats {
        name: "Zergling",
        plural: "Zerglings",
        attack: 2,
        defense: 1,
        minerals: 1,
        gas: 0,
    },
    UnitStats {
        name: "Hydralisk",
        plural: "Hydralisks",
        attack: 2,
        defense: 3,
        minerals: 3,
        gas: 1,
    },
    UnitStats {
        name: "Mutalisk",
        plural: "Mutalisks",
        attack: 2,
        defense: 1,
        minerals: 2,
        gas: 2,
    },
    UnitStats {
        name: "Spore Crawler",
        plural: "Spore Crawlers",
        attack: 0,
        defense: 1,
        minerals: 1,
        gas: 1,
    },
];

impl UnitKind {
    /// Every unit kind, in catalog order.
    pub const ALL: [UnitKind; UNIT_KIND_COUNT] = [
        UnitKind::Drone,
        UnitKind::Zergling,
        UnitKind::Hydralisk,
        UnitKind::Mutalisk,
        UnitKind::SporeCrawler,
    ];

    /// Kinds that contribute damage to attacks.
    pub const OFFENSIVE: [UnitKind; 3] =
        [UnitKind::Zergling, UnitKind::Hydralisk, UnitKind::Mutalisk];

    /// Position of this kind in [`UnitKind::ALL`].
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Catalog entry for this kind.
    #[must_use]
    #[inline]
    pub const fn stats(self) -> &'static UnitStats {
        &CATALOG[self as usize]
    }

    /// Whether units of this kind can be committed to an attack.
    #[must_use]
    pub const fn is_offensive(self) -> bool {
        matches!(
            self,
            UnitKind::Zergling | UnitKind::Hydralisk | UnitKind::Mutalisk
        )
    }

    /// Letter used for this kind in compact unit strings.
    #[must_use]
    pub const fn token(self) -> char {
        match self {
            UnitKind::Drone => 'd',
            UnitKind::Zergling => 'z',
            UnitKind::Hydralisk => 'h',
            UnitKind::Mutalisk => 'm',
            UnitKind::SporeCrawler => 's',
        }
    }

    /// Look up a kind by its compact-string letter (case-insensitive).
    #[must_use]
    pub fn from_token(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'd' => Some(UnitKind::Drone),
            'z' => Some(UnitKind::Zergling),
            'h' => Some(UnitKind::Hydralisk),
            'm' => Some(UnitKind::Mutalisk),
            's' => Some(UnitKind::SporeCrawler),
            _ => None,
        }
    }

    /// Human-readable quantity, e.g. "1 Zergling" or "3 Zerglings".
    #[must_use]
    pub fn quantity(self, count: u32) -> String {
        let stats = self.stats();
        if count == 1 {
            format!("{count} {}", stats.name)
        } else {
            format!("{count} {}", stats.plural)
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stats().name)
    }
}

/// A mineral and gas amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cost {
    /// Minerals.
    pub minerals: u32,
    /// Vespene gas.
    pub gas: u32,
}

impl Cost {
    /// Create a new cost.
    #[must_use]
    pub const fn new(minerals: u32, gas: u32) -> Self {
        Self { minerals, gas }
    }

    /// Whether a stock of `self` is enough to pay `price`.
    ///
    /// Minerals and gas are checked independently; both must be covered.
    #[must_use]
    pub const fn covers(self, price: Cost) -> bool {
        self.minerals >= price.minerals && self.gas >= price.gas
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minerals, {} gas", self.minerals, self.gas)
    }
}

/// Owned, requested or committed unit counts, one slot per [`UnitKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitCounts([u32; UNIT_KIND_COUNT]);

impl UnitCounts {
    /// All counts zero.
    #[must_use]
    pub const fn new() -> Self {
        Self([0; UNIT_KIND_COUNT])
    }

    /// Builder-style setter, mostly useful in tests and setup code.
    #[must_use]
    pub const fn with(mut self, kind: UnitKind, count: u32) -> Self {
        self.0[kind as usize] = count;
        self
    }

    /// Count for a kind.
    #[must_use]
    #[inline]
    pub const fn get(&self, kind: UnitKind) -> u32 {
        self.0[kind as usize]
    }

    /// Add `count` units of `kind`, saturating at `u32::MAX`.
    pub fn add(&mut self, kind: UnitKind, count: u32) {
        let slot = &mut self.0[kind.index()];
        *slot = slot.saturating_add(count);
    }

    /// Add every count of `other` into `self`.
    pub fn add_all(&mut self, other: &UnitCounts) {
        for (kind, count) in other.entries() {
            self.add(kind, count);
        }
    }

    /// Total number of units across all kinds.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, &n| acc.saturating_add(n))
    }

    /// True if every count is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Iterate `(kind, count)` pairs in catalog order, zeros included.
    pub fn entries(&self) -> impl Iterator<Item = (UnitKind, u32)> + '_ {
        UnitKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }

    /// Only the offensive kinds; drones and spore crawlers are zeroed.
    #[must_use]
    pub fn offensive(&self) -> Self {
        let mut out = Self::new();
        for kind in UnitKind::OFFENSIVE {
            out.0[kind.index()] = self.get(kind);
        }
        out
    }

    /// Per-kind minimum of `self` and `limit`.
    #[must_use]
    pub fn clamped_to(&self, limit: &UnitCounts) -> Self {
        let mut out = *self;
        for (slot, &max) in out.0.iter_mut().zip(limit.0.iter()) {
            *slot = (*slot).min(max);
        }
        out
    }

    /// Total morph cost of these units, or `None` if it does not fit in a
    /// [`Cost`].
    #[must_use]
    pub fn checked_cost(&self) -> Option<Cost> {
        self.entries().try_fold(Cost::default(), |acc, (kind, count)| {
            let unit = kind.stats();
            Some(Cost {
                minerals: acc
                    .minerals
                    .checked_add(count.checked_mul(unit.minerals)?)?,
                gas: acc.gas.checked_add(count.checked_mul(unit.gas)?)?,
            })
        })
    }

    /// Total morph cost of these units, saturating at `u32::MAX`.
    #[must_use]
    pub fn cost(&self) -> Cost {
        self.entries().fold(Cost::default(), |acc, (kind, count)| {
            let unit = kind.stats();
            Cost {
                minerals: acc
                    .minerals
                    .saturating_add(count.saturating_mul(unit.minerals)),
                gas: acc.gas.saturating_add(count.saturating_mul(unit.gas)),
            }
        })
    }

    /// Total attack damage of these units.
    #[must_use]
    pub fn damage(&self) -> u32 {
        self.entries().fold(0u32, |acc, (kind, count)| {
            acc.saturating_add(count.saturating_mul(kind.stats().attack))
        })
    }

    /// Parse a compact unit string such as `"zzh"`.
    ///
    /// Each letter adds one unit of its kind; letters are case-insensitive
    /// and order does not matter. Characters that name no kind are ignored.
    #[must_use]
    pub fn parse_compact(input: &str) -> Self {
        let mut counts = Self::new();
        for kind in input.chars().filter_map(UnitKind::from_token) {
            counts.add(kind, 1);
        }
        counts
    }
}

impl Index<UnitKind> for UnitCounts {
    type Output = u32;

    fn index(&self, kind: UnitKind) -> &u32 {
        &self.0[kind.index()]
    }
}

impl IndexMut<UnitKind> for UnitCounts {
    fn index_mut(&mut self, kind: UnitKind) -> &mut u32 {
        &mut self.0[kind.index()]
    }
}

impl fmt::Display for UnitCounts {
    /// Lists the non-zero kinds, e.g. "2 Zerglings, 1 Hydralisk".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (kind, count) in self.entries().filter(|&(_, n)| n > 0) {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(&kind.quantity(count))?;
            first = false;
        }
        if first {
            f.write_str("no units")?;
        }
        Ok(())
    }
}
