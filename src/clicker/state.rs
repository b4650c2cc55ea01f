//! Progression state of the clicker.

use std::collections::{BTreeMap, BTreeSet};

use super::calc;

/// Most units of one building a save may hold. Larger stored counts are
/// capped on load and purchases stop here.
pub const MAX_OWNED: u32 = 1_000_000;

/// Everything the player has earned.
///
/// Outside the store this is only ever seen through `&ProgressionState`,
/// so the primary fields are public for reading while mutation stays with
/// [`ProgressionStore`](super::store::ProgressionStore). The yield is
/// derived and only refreshed through [`refresh_derived`](Self::refresh_derived).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressionState {
    /// Spendable resource. Fractional; shown floored.
    pub resource_count: f64,
    /// Units owned per building id. A missing id means zero.
    pub owned_buildings: BTreeMap<String, u32>,
    /// Upgrade ids bought so far.
    pub purchased_upgrades: BTreeSet<String>,
    total_yield_per_second: f64,
}

impl ProgressionState {
    /// A repaired state with its yield already derived.
    pub fn with_progress(
        resource_count: f64,
        owned_buildings: BTreeMap<String, u32>,
        purchased_upgrades: BTreeSet<String>,
    ) -> Self {
        let mut state = Self {
            resource_count,
            owned_buildings,
            purchased_upgrades,
            total_yield_per_second: 0.0,
        };
        state.repair();
        state.refresh_derived();
        state
    }

    /// Only a resource count, nothing owned.
    pub fn with_resources(resource_count: f64) -> Self {
        Self::with_progress(resource_count, BTreeMap::new(), BTreeSet::new())
    }

    /// Passive yield, as of the last mutation.
    pub fn total_yield_per_second(&self) -> f64 {
        self.total_yield_per_second
    }

    pub fn owned(&self, building_id: &str) -> u32 {
        self.owned_buildings.get(building_id).copied().unwrap_or(0)
    }

    pub fn total_owned(&self) -> u32 {
        self.owned_buildings
            .values()
            .fold(0u32, |total, &n| total.saturating_add(n))
    }

    pub fn has_upgrade(&self, upgrade_id: &str) -> bool {
        self.purchased_upgrades.contains(upgrade_id)
    }

    /// The resource count rounded down, as displayed.
    pub fn displayed_count(&self) -> u64 {
        self.resource_count.max(0.0).floor() as u64
    }

    /// Clamp a broken resource count back to zero and cap building counts.
    pub(super) fn repair(&mut self) {
        if !self.resource_count.is_finite() || self.resource_count < 0.0 {
            self.resource_count = 0.0;
        }
        self.owned_buildings.retain(|_, count| *count > 0);
        for count in self.owned_buildings.values_mut() {
            *count = (*count).min(MAX_OWNED);
        }
    }

    pub(super) fn refresh_derived(&mut self) {
        self.total_yield_per_second = calc::total_yield_per_second(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let state = ProgressionState::default();
        assert_eq!(state.resource_count, 0.0);
        assert!(state.owned_buildings.is_empty());
        assert!(state.purchased_upgrades.is_empty());
        assert_eq!(state.total_yield_per_second(), 0.0);
    }

    #[test]
    fn owned_defaults_to_zero() {
        let mut state = ProgressionState::default();
        assert_eq!(state.owned("cursor"), 0);
        state.owned_buildings.insert("cursor".into(), 4);
        state.owned_buildings.insert("intern".into(), 2);
        assert_eq!(state.owned("cursor"), 4);
        assert_eq!(state.total_owned(), 6);
    }

    #[test]
    fn displayed_count_floors() {
        let state = ProgressionState {
            resource_count: 41.99,
            ..Default::default()
        };
        assert_eq!(state.displayed_count(), 41);
    }

    #[test]
    fn repair_clamps_negative_and_nan() {
        let mut state = ProgressionState {
            resource_count: -3.0,
            ..Default::default()
        };
        state.repair();
        assert_eq!(state.resource_count, 0.0);

        state.resource_count = f64::NAN;
        state.repair();
        assert_eq!(state.resource_count, 0.0);
    }

    #[test]
    fn repair_drops_zero_counts() {
        let mut state = ProgressionState::default();
        state.owned_buildings.insert("cursor".into(), 0);
        state.repair();
        assert!(state.owned_buildings.is_empty());
    }

    #[test]
    fn repair_caps_huge_counts() {
        let mut state = ProgressionState::default();
        state.owned_buildings.insert("cursor".into(), u32::MAX);
        state.repair();
        assert_eq!(state.owned("cursor"), MAX_OWNED);
    }

    #[test]
    fn total_owned_saturates() {
        let mut state = ProgressionState::default();
        state.owned_buildings.insert("cursor".into(), 4_000_000_000);
        state.owned_buildings.insert("intern".into(), 4_000_000_000);
        assert_eq!(state.total_owned(), u32::MAX);
    }

    #[test]
    fn with_progress_repairs_and_derives() {
        let mut owned = BTreeMap::new();
        owned.insert("intern".to_string(), 3);
        owned.insert("cursor".to_string(), 0);
        let state = ProgressionState::with_progress(-1.0, owned, BTreeSet::new());
        assert_eq!(state.resource_count, 0.0);
        assert!(!state.owned_buildings.contains_key("cursor"));
        assert!((state.total_yield_per_second() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn refresh_derived_tracks_buildings() {
        let mut state = ProgressionState::default();
        state.owned_buildings.insert("intern".into(), 3);
        assert_eq!(state.total_yield_per_second(), 0.0);
        state.refresh_derived();
        assert!((state.total_yield_per_second() - 3.0).abs() < 1e-9);
    }
}
