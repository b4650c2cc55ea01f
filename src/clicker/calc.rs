//! Derived values: yield, manual gain, prices. Pure functions of the state.

use super::catalog::{self, BuildingDef, UpgradeDef, UpgradeEffect, BUILDINGS, CLICK_BONUS_RATE};
use super::state::ProgressionState;

/// Number of purchased tier upgrades targeting `building_id`.
pub fn tier_count(state: &ProgressionState, building_id: &str) -> u32 {
    state
        .purchased_upgrades
        .iter()
        .filter_map(|id| catalog::upgrade(id))
        .filter(|u| u.target() == Some(building_id))
        .count() as u32
}

/// Product of the multipliers of every purchased tier upgrade on `building_id`.
pub fn tier_multiplier(state: &ProgressionState, building_id: &str) -> f64 {
    state
        .purchased_upgrades
        .iter()
        .filter_map(|id| catalog::upgrade(id))
        .filter_map(|u| match u.effect {
            UpgradeEffect::Tier {
                building,
                multiplier,
            } if building == building_id => Some(multiplier),
            _ => None,
        })
        .product()
}

/// `baseYield × owned × 2^tiers` for one building.
pub fn building_yield(def: &BuildingDef, state: &ProgressionState) -> f64 {
    def.base_yield * state.owned(def.id) as f64 * tier_multiplier(state, def.id)
}

/// Sum of [`building_yield`] over the catalog.
pub fn total_yield_per_second(state: &ProgressionState) -> f64 {
    BUILDINGS.iter().map(|b| building_yield(b, state)).sum()
}

/// Number of purchased global click upgrades.
pub fn click_upgrade_count(state: &ProgressionState) -> u32 {
    state
        .purchased_upgrades
        .iter()
        .filter_map(|id| catalog::upgrade(id))
        .filter(|u| u.effect == UpgradeEffect::ClickBonus)
        .count() as u32
}

/// Resource gained by one click: `1 + yield × 0.01 × (1 + clickUpgrades)`,
/// rounded to one decimal.
pub fn manual_gain(state: &ProgressionState) -> f64 {
    let steps = 1 + click_upgrade_count(state);
    let raw = 1.0 + total_yield_per_second(state) * CLICK_BONUS_RATE * steps as f64;
    round1(raw)
}

fn round1(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}

pub fn next_building_cost(state: &ProgressionState, def: &BuildingDef) -> f64 {
    catalog::building_cost(def, state.owned(def.id))
}

pub fn can_afford_building(state: &ProgressionState, def: &BuildingDef) -> bool {
    state.resource_count >= next_building_cost(state, def)
}

/// Not yet purchased and unlocked.
pub fn is_upgrade_available(state: &ProgressionState, def: &UpgradeDef) -> bool {
    !state.has_upgrade(def.id) && def.unlock.is_met(state)
}

pub fn can_afford_upgrade(state: &ProgressionState, def: &UpgradeDef) -> bool {
    is_upgrade_available(state, def) && state.resource_count >= def.cost
}

/// Seconds until the next unit of `def` pays back its price.
/// `None` when the building yields nothing.
pub fn payback_seconds(state: &ProgressionState, def: &BuildingDef) -> Option<f64> {
    let gain = def.base_yield * tier_multiplier(state, def.id);
    if gain > 0.0 {
        Some(next_building_cost(state, def) / gain)
    } else {
        None
    }
}
