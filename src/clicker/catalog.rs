//! Static catalog of buildings and upgrades.
//!
//! Nothing here mutates at runtime. Building prices grow geometrically with
//! the number already owned; upgrade prices are flat.

use super::format::format_compact;
use super::state::ProgressionState;

/// Price growth per building already owned.
pub const GROWTH_FACTOR: f64 = 1.15;

/// Share of passive yield added to every manual click, per click upgrade tier.
pub const CLICK_BONUS_RATE: f64 = 0.01;

/// Multiplier applied by every tier upgrade.
pub const TIER_MULTIPLIER: f64 = 2.0;

/// A purchasable passive producer.
#[derive(Debug, PartialEq)]
pub struct BuildingDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Price of the first unit.
    pub base_cost: f64,
    /// Resource per second produced by one unit with no upgrades.
    pub base_yield: f64,
    /// Keyboard shortcut used by the widget.
    pub key: char,
}

/// What a purchased upgrade does.
#[derive(Clone, Debug, PartialEq)]
pub enum UpgradeEffect {
    /// Multiplies one building's yield.
    Tier {
        building: &'static str,
        multiplier: f64,
    },
    /// Adds one step to the manual-gain bonus.
    ClickBonus,
}

/// Condition under which an upgrade may be bought.
#[derive(Clone, Debug, PartialEq)]
pub enum Unlock {
    Always,
    /// At least `count` units of `building` owned.
    Owns {
        building: &'static str,
        count: u32,
    },
    /// At least this many buildings owned across all kinds.
    TotalBuildings(u32),
    /// Current resource count at or above the threshold.
    Resource(f64),
}

impl Unlock {
    pub fn is_met(&self, state: &ProgressionState) -> bool {
        match self {
            Unlock::Always => true,
            Unlock::Owns { building, count } => state.owned(building) >= *count,
            Unlock::TotalBuildings(n) => state.total_owned() >= *n,
            Unlock::Resource(amount) => state.resource_count >= *amount,
        }
    }

    /// Short hint shown next to a locked upgrade.
    pub fn hint(&self) -> String {
        match self {
            Unlock::Always => String::new(),
            Unlock::Owns { building, count } => {
                let name = BUILDINGS
                    .iter()
                    .find(|b| b.id == *building)
                    .map_or(*building, |b| b.name);
                format!("own {count} {name}")
            }
            Unlock::TotalBuildings(n) => format!("own {n} buildings"),
            Unlock::Resource(amount) => format!("reach {}", format_compact(*amount)),
        }
    }
}

/// A one-time purchase.
#[derive(Debug, PartialEq)]
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: f64,
    pub effect: UpgradeEffect,
    pub unlock: Unlock,
}

impl UpgradeDef {
    /// Building this upgrade multiplies, or `None` for a global click upgrade.
    pub fn target(&self) -> Option<&'static str> {
        match self.effect {
            UpgradeEffect::Tier { building, .. } => Some(building),
            UpgradeEffect::ClickBonus => None,
        }
    }
}

pub static BUILDINGS: &[BuildingDef] = &[
    BuildingDef {
        id: "cursor",
        name: "Cursor",
        description: "An extra finger on the mouse",
        base_cost: 15.0,
        base_yield: 0.1,
        key: '1',
    },
    BuildingDef {
        id: "intern",
        name: "Intern",
        description: "Clicks so you don't have to",
        base_cost: 100.0,
        base_yield: 1.0,
        key: '2',
    },
    BuildingDef {
        id: "script",
        name: "Script",
        description: "A bash loop that never sleeps",
        base_cost: 1_100.0,
        base_yield: 8.0,
        key: '3',
    },
    BuildingDef {
        id: "pipeline",
        name: "CI Pipeline",
        description: "Clicks on every push",
        base_cost: 12_000.0,
        base_yield: 47.0,
        key: '4',
    },
    BuildingDef {
        id: "datacenter",
        name: "Datacenter",
        description: "A rack of headless browsers",
        base_cost: 130_000.0,
        base_yield: 260.0,
        key: '5',
    },
];

const fn tier(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    building: &'static str,
    cost: f64,
    owned: u32,
) -> UpgradeDef {
    UpgradeDef {
        id,
        name,
        description,
        cost,
        effect: UpgradeEffect::Tier {
            building,
            multiplier: TIER_MULTIPLIER,
        },
        unlock: Unlock::Owns {
            building,
            count: owned,
        },
    }
}

pub static UPGRADES: &[UpgradeDef] = &[
    tier("cursor-1", "Gaming Mouse", "Cursor yield x2", "cursor", 150.0, 1),
    tier("cursor-2", "Trackball", "Cursor yield x2", "cursor", 1_500.0, 10),
    tier("intern-1", "Free Coffee", "Intern yield x2", "intern", 1_000.0, 1),
    tier("intern-2", "Standing Desks", "Intern yield x2", "intern", 10_000.0, 10),
    tier("script-1", "Cron Job", "Script yield x2", "script", 11_000.0, 1),
    tier("script-2", "Rewrite It In Rust", "Script yield x2", "script", 110_000.0, 10),
    tier("pipeline-1", "Build Cache", "CI Pipeline yield x2", "pipeline", 120_000.0, 1),
    tier("pipeline-2", "Parallel Runners", "CI Pipeline yield x2", "pipeline", 1_200_000.0, 10),
    tier("datacenter-1", "Liquid Cooling", "Datacenter yield x2", "datacenter", 1_300_000.0, 1),
    tier("datacenter-2", "Second Region", "Datacenter yield x2", "datacenter", 13_000_000.0, 10),
    UpgradeDef {
        id: "click-1",
        name: "Ergonomic Mouse",
        description: "Clicks gain +1% of yield/sec",
        cost: 500.0,
        effect: UpgradeEffect::ClickBonus,
        unlock: Unlock::TotalBuildings(1),
    },
    UpgradeDef {
        id: "click-2",
        name: "Mechanical Keyboard",
        description: "Clicks gain +1% of yield/sec",
        cost: 50_000.0,
        effect: UpgradeEffect::ClickBonus,
        unlock: Unlock::TotalBuildings(25),
    },
    UpgradeDef {
        id: "click-3",
        name: "Macro Pad",
        description: "Clicks gain +1% of yield/sec",
        cost: 5_000_000.0,
        effect: UpgradeEffect::ClickBonus,
        unlock: Unlock::Resource(1_000_000.0),
    },
];

pub fn building(id: &str) -> Option<&'static BuildingDef> {
    BUILDINGS.iter().find(|b| b.id == id)
}

pub fn upgrade(id: &str) -> Option<&'static UpgradeDef> {
    UPGRADES.iter().find(|u| u.id == id)
}

/// Price of the next unit when `owned` are already owned: `ceil(base × 1.15^owned)`.
pub fn building_cost(def: &BuildingDef, owned: u32) -> f64 {
    let exponent = i32::try_from(owned).unwrap_or(i32::MAX);
    (def.base_cost * GROWTH_FACTOR.powi(exponent)).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let buildings: HashSet<_> = BUILDINGS.iter().map(|b| b.id).collect();
        assert_eq!(buildings.len(), BUILDINGS.len());
        let upgrades: HashSet<_> = UPGRADES.iter().map(|u| u.id).collect();
        assert_eq!(upgrades.len(), UPGRADES.len());
    }

    #[test]
    fn building_keys_are_unique() {
        let keys: HashSet<_> = BUILDINGS.iter().map(|b| b.key).collect();
        assert_eq!(keys.len(), BUILDINGS.len());
    }

    #[test]
    fn tier_upgrades_target_known_buildings() {
        for u in UPGRADES {
            if let Some(target) = u.target() {
                assert!(building(target).is_some(), "{} targets {}", u.id, target);
            }
            if let Unlock::Owns { building: b, .. } = u.unlock {
                assert!(building(b).is_some(), "{} unlocks on {}", u.id, b);
            }
        }
    }

    #[test]
    fn definitions_are_well_formed() {
        for b in BUILDINGS {
            assert!(b.base_cost > 0.0);
            assert!(b.base_yield >= 0.0);
        }
        for u in UPGRADES {
            assert!(u.cost > 0.0);
        }
    }

    #[test]
    fn first_unit_costs_base() {
        let cursor = building("cursor").unwrap();
        assert_eq!(building_cost(cursor, 0), 15.0);
    }

    #[test]
    fn cost_is_ceiled_geometric() {
        let cursor = building("cursor").unwrap();
        // 15 × 1.15 = 17.25, 15 × 1.15² = 19.8375
        assert_eq!(building_cost(cursor, 1), 18.0);
        assert_eq!(building_cost(cursor, 2), 20.0);
        let expected = (15.0 * 1.15_f64.powi(10)).ceil();
        assert_eq!(building_cost(cursor, 10), expected);
    }

    #[test]
    fn huge_counts_never_get_cheaper() {
        let cursor = building("cursor").unwrap();
        assert!(building_cost(cursor, u32::MAX) >= building_cost(cursor, 1_000));
        assert!(building_cost(cursor, u32::MAX) > 14.0);
    }

    #[test]
    fn unknown_ids_are_none() {
        assert!(building("rocket").is_none());
        assert!(upgrade("rocket-1").is_none());
    }

    #[test]
    fn unlock_predicates() {
        let mut state = ProgressionState::default();
        let owns = Unlock::Owns {
            building: "cursor",
            count: 2,
        };
        assert!(Unlock::Always.is_met(&state));
        assert!(!owns.is_met(&state));
        assert!(!Unlock::TotalBuildings(3).is_met(&state));

        state.owned_buildings.insert("cursor".into(), 2);
        state.owned_buildings.insert("intern".into(), 1);
        assert!(owns.is_met(&state));
        assert!(Unlock::TotalBuildings(3).is_met(&state));

        assert!(!Unlock::Resource(10.0).is_met(&state));
        state.resource_count = 10.0;
        assert!(Unlock::Resource(10.0).is_met(&state));
    }

    #[test]
    fn unlock_hint_uses_display_name() {
        let owns = Unlock::Owns {
            building: "pipeline",
            count: 10,
        };
        assert_eq!(owns.hint(), "own 10 CI Pipeline");
        assert_eq!(Unlock::Resource(1_000_000.0).hint(), "reach 1.0M");
        assert_eq!(Unlock::Always.hint(), "");
    }
}
