//! Morph economy: turning minerals and gas into units.
//!
//! Every request is validated against the current stock before anything is
//! touched. A rejected request leaves the player exactly as it was.

use crate::game::{Cost, Player, UnitCounts, UnitKind};

/// Token that ends the morph phase without buying anything.
pub const SKIP_TOKEN: &str = "x";

/// A parsed morph-phase input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOrder {
    /// End the morph phase without buying.
    Skip,
    /// Buy these units.
    Units(UnitCounts),
}

impl MorphOrder {
    /// Parse a morph token: the skip token, or a compact unit string.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case(SKIP_TOKEN) {
            MorphOrder::Skip
        } else {
            MorphOrder::Units(UnitCounts::parse_compact(token))
        }
    }
}

/// A morph request costs more than the player has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("insufficient funds: need {required}, have {available}")]
pub struct InsufficientFunds {
    /// Total cost of the rejected request.
    pub required: Cost,
    /// Stock at the time of the request.
    pub available: Cost,
}

/// Unit kinds the player can afford one of right now.
///
/// Each kind is checked on its own against the full stock.
#[must_use]
pub fn affordable_units(player: &Player) -> Vec<UnitKind> {
    let stock = player.stock();
    UnitKind::ALL
        .into_iter()
        .filter(|kind| stock.covers(kind.stats().cost()))
        .collect()
}

/// Validate a morph request and apply it if the player can pay.
///
/// On success the units are added, the cost is deducted and the cost is
/// returned.
///
/// # Errors
///
/// Returns [`InsufficientFunds`] if either minerals or gas fall short, or
/// the total cost overflows; the player is not modified.
pub fn apply_morph(player: &mut Player, order: &UnitCounts) -> Result<Cost, InsufficientFunds> {
    let available = player.stock();
    let required = match order.checked_cost() {
        Some(required) if available.covers(required) => required,
        _ => {
            return Err(InsufficientFunds {
                required: order.cost(),
                available,
            });
        }
    };

    player.units.add_all(order);
    player.minerals -= required.minerals;
    player.gas -= required.gas;
    Ok(required)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with(minerals: u32, gas: u32) -> Player {
        let mut player = Player::new(1);
        player.minerals = minerals;
        player.gas = gas;
        player
    }

    #[test]
    fn test_parse_skip() {
        assert_eq!(MorphOrder::parse("x"), MorphOrder::Skip);
        assert_eq!(MorphOrder::parse(" X "), MorphOrder::Skip);
        assert_eq!(
            MorphOrder::parse("zzd"),
            MorphOrder::Units(
                UnitCounts::new()
                    .with(UnitKind::Zergling, 2)
                    .with(UnitKind::Drone, 1)
            )
        );
        // 'x' mixed with units is not a skip
        assert!(matches!(MorphOrder::parse("xz"), MorphOrder::Units(_)));
    }

    #[test]
    fn test_affordable_with_minerals_only() {
        let player = player_with(3, 0);
        assert_eq!(
            affordable_units(&player),
            vec![UnitKind::Drone, UnitKind::Zergling]
        );
    }

    #[test]
    fn test_affordable_is_per_kind() {
        let player = player_with(3, 2);
        assert_eq!(affordable_units(&player), UnitKind::ALL.to_vec());
    }

    #[test]
    fn test_nothing_affordable() {
        assert!(affordable_units(&player_with(0, 5)).is_empty());
    }

    #[test]
    fn test_apply_morph_success() {
        let mut player = player_with(5, 2);
        let order = UnitCounts::new()
            .with(UnitKind::Hydralisk, 1)
            .with(UnitKind::Zergling, 2);

        let cost = apply_morph(&mut player, &order).unwrap();
        assert_eq!(cost, Cost::new(5, 1));
        assert_eq!(player.stock(), Cost::new(0, 1));
        assert_eq!(player.units[UnitKind::Hydralisk], 1);
        assert_eq!(player.units[UnitKind::Zergling], 2);
        assert_eq!(player.units[UnitKind::Drone], 2);
    }

    #[test]
    fn test_apply_morph_rejects_whole_request() {
        let mut player = player_with(4, 0);
        let before = player.clone();
        let order = UnitCounts::new()
            .with(UnitKind::Zergling, 1)
            .with(UnitKind::Hydralisk, 1);

        let err = apply_morph(&mut player, &order).unwrap_err();
        assert_eq!(err.required, Cost::new(4, 1));
        assert_eq!(err.available, Cost::new(4, 0));
        assert_eq!(player, before);
    }

    #[test]
    fn test_apply_morph_rejects_overflowing_cost() {
        let mut player = player_with(u32::MAX, 0);
        let before = player.clone();
        // One mineral per unit, one unit more than the stock can ever pay for.
        let order = UnitCounts::new()
            .with(UnitKind::Zergling, u32::MAX)
            .with(UnitKind::Drone, 1);
        assert_eq!(order.checked_cost(), None);

        let err = apply_morph(&mut player, &order).unwrap_err();
        assert_eq!(err.required, Cost::new(u32::MAX, 0));
        assert_eq!(player, before);
    }

    #[test]
    fn test_apply_empty_order() {
        let mut player = player_with(1, 0);
        let cost = apply_morph(&mut player, &UnitCounts::new()).unwrap();
        assert_eq!(cost, Cost::default());
        assert_eq!(player.stock(), Cost::new(1, 0));
    }
}
