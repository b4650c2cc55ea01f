//! Persisted save format and migration of older shapes.
//!
//! ## Versions
//!
//! - v1: the first widget stored a bare click count (`42`) under
//!   `clicker-count`. An intermediate click-power build stored objects such
//!   as `{"count": 42, "clickPower": 3}`.
//! - v2 (current): `{"version": 2, "resourceCount": .., "ownedBuildings": {..},
//!   "purchasedUpgrades": [..]}` under `clicker-state`.
//!
//! The version is recognised by shape. Anything older than v2 keeps only its
//! primary counter; every other progression field starts over. Shapes that
//! match nothing, and saves from a newer version, are rejected.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use super::catalog;
use super::state::{ProgressionState, MAX_OWNED};

pub const SAVE_VERSION: u32 = 2;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveData {
    #[serde(default = "current_version")]
    version: u32,
    resource_count: f64,
    #[serde(deserialize_with = "lenient_counts")]
    owned_buildings: BTreeMap<String, u32>,
    purchased_upgrades: BTreeSet<String>,
}

/// Building counts as whole numbers in `0..=MAX_OWNED`. Negative, fractional,
/// oversized or non-numeric entries are clamped instead of failing the save.
fn lenient_counts<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, u32>, D::Error> {
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(d)?;
    Ok(raw
        .into_iter()
        .map(|(id, value)| (id, clamp_count(value.as_f64().unwrap_or(0.0))))
        .collect())
}

fn clamp_count(n: f64) -> u32 {
    if !n.is_finite() || n <= 0.0 {
        0
    } else {
        n.floor().min(MAX_OWNED as f64) as u32
    }
}

fn current_version() -> u32 {
    SAVE_VERSION
}

/// Any object from before v2 that still carries the counter.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyObject {
    #[serde(alias = "count", alias = "clicks")]
    resource_count: f64,
}

/// Tried in order; the first shape that parses wins.
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedShape {
    Current(SaveData),
    LegacyObject(LegacyObject),
    LegacyCount(f64),
}

/// Outcome of decoding one stored value.
#[derive(Debug, PartialEq)]
pub enum Decoded {
    /// Current format, sanitised.
    Current(ProgressionState),
    /// Older format; only the counter survived.
    Migrated(ProgressionState),
    /// Corrupt JSON, unknown shape, or a newer version.
    Unrecognized,
}

/// Which tab accrues passive income, and until when (ms since the epoch).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerLease {
    pub holder: String,
    pub expires_at: f64,
}

impl TickerLease {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// `None` for anything unreadable; such a lease counts as free.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Serialize the primary fields of `state`. The derived yield is not stored.
pub fn encode(state: &ProgressionState) -> Result<String, serde_json::Error> {
    let data = SaveData {
        version: SAVE_VERSION,
        resource_count: state.resource_count,
        owned_buildings: state.owned_buildings.clone(),
        purchased_upgrades: state.purchased_upgrades.clone(),
    };
    serde_json::to_string(&data)
}

pub fn decode(raw: &str) -> Decoded {
    let shape: PersistedShape = match serde_json::from_str(raw) {
        Ok(s) => s,
        Err(_) => return Decoded::Unrecognized,
    };

    match shape {
        PersistedShape::Current(data) if data.version > SAVE_VERSION => Decoded::Unrecognized,
        PersistedShape::Current(data) => Decoded::Current(from_current(data)),
        PersistedShape::LegacyObject(LegacyObject { resource_count })
        | PersistedShape::LegacyCount(resource_count) => {
            Decoded::Migrated(ProgressionState::with_resources(resource_count))
        }
    }
}

/// Drop ids the catalog no longer knows and recompute the yield.
fn from_current(data: SaveData) -> ProgressionState {
    ProgressionState::with_progress(
        data.resource_count,
        data.owned_buildings
            .into_iter()
            .filter(|(id, _)| catalog::building(id).is_some())
            .collect(),
        data.purchased_upgrades
            .into_iter()
            .filter(|id| catalog::upgrade(id).is_some())
            .collect(),
    )
}
