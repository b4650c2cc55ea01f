//! The progression store: single owner of [`ProgressionState`].
//!
//! Every mutation goes through a named operation, is written to storage
//! synchronously, and is then broadcast to subscribers. Nothing here
//! returns an error: invalid purchases are no-ops and storage failures are
//! logged and swallowed, leaving the in-memory state authoritative.

use super::calc;
use super::catalog;
use super::config::ClickerConfig;
use super::save::{self, Decoded, TickerLease};
use super::state::{ProgressionState, MAX_OWNED};
use super::storage::{Storage, StorageError};
use crate::log;

/// Handle returned by [`ProgressionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ProgressionState)>;

/// Where the initial state came from.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    /// Nothing stored (or storage unreadable).
    Fresh,
    /// Current save format.
    Restored,
    /// An older format was converted.
    Migrated,
    /// Stored data could not be understood and was dropped.
    Discarded,
}

pub struct ProgressionStore {
    state: ProgressionState,
    storage: Box<dyn Storage>,
    config: ClickerConfig,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    load_outcome: LoadOutcome,
}

impl ProgressionStore {
    /// Load state from `storage`, migrating legacy data if needed.
    pub fn load(storage: Box<dyn Storage>, config: ClickerConfig) -> Self {
        let mut store = Self {
            state: ProgressionState::default(),
            storage,
            config,
            listeners: Vec::new(),
            next_subscription: 0,
            load_outcome: LoadOutcome::Fresh,
        };
        store.restore();
        store
    }

    pub fn snapshot(&self) -> &ProgressionState {
        &self.state
    }

    pub fn config(&self) -> &ClickerConfig {
        &self.config
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Register `listener`; it runs after every mutation with the new state.
    /// Listeners must not call back into the store.
    pub fn subscribe(&mut self, listener: impl FnMut(&ProgressionState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Buy one unit of a building. Returns true if it was bought.
    pub fn purchase_building(&mut self, id: &str) -> bool {
        let Some(def) = catalog::building(id) else {
            return false;
        };
        let owned = self.state.owned(def.id);
        if owned >= MAX_OWNED {
            return false;
        }
        let cost = calc::next_building_cost(&self.state, def);
        if self.state.resource_count < cost {
            return false;
        }
        self.state.resource_count -= cost;
        self.state
            .owned_buildings
            .insert(def.id.to_string(), owned.saturating_add(1));
        self.commit();
        true
    }

    /// Buy an upgrade. Returns true if it was bought.
    pub fn purchase_upgrade(&mut self, id: &str) -> bool {
        let Some(def) = catalog::upgrade(id) else {
            return false;
        };
        if !calc::can_afford_upgrade(&self.state, def) {
            return false;
        }
        self.state.resource_count -= def.cost;
        self.state.purchased_upgrades.insert(def.id.to_string());
        self.commit();
        true
    }

    /// Credit one manual click. Returns the amount gained.
    pub fn apply_manual_gain(&mut self) -> f64 {
        let gain = calc::manual_gain(&self.state);
        self.state.resource_count += gain;
        self.commit();
        gain
    }

    /// Credit `delta_seconds` of passive yield.
    pub fn apply_passive_gain(&mut self, delta_seconds: f64) {
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return;
        }
        let gain = self.state.total_yield_per_second() * delta_seconds;
        if gain <= 0.0 {
            return;
        }
        self.state.resource_count += gain;
        self.commit();
    }

    /// Back to the zero/empty default.
    pub fn reset(&mut self) {
        self.state = ProgressionState::default();
        self.commit();
        log::info("progress reset");
    }

    /// Adopt a value written by another tab. Returns true if it was taken.
    ///
    /// Only the current save format is accepted; legacy or unreadable values
    /// are ignored. Nothing is written back.
    pub fn sync_from_storage(&mut self, raw: Option<&str>) -> bool {
        let Some(raw) = raw else {
            return false;
        };
        match save::decode(raw) {
            Decoded::Current(state) => {
                if state != self.state {
                    self.state = state;
                    self.notify();
                }
                true
            }
            Decoded::Migrated(_) | Decoded::Unrecognized => false,
        }
    }

    /// Claim or renew the passive-income lease for `tab` at `now_ms`.
    ///
    /// Every open tab runs a tick driver and adopts the others' saves, so
    /// only the lease holder may credit passive income. The lease is free
    /// when missing, unreadable, expired, or already ours. Without readable
    /// storage there is nobody to share with, so the claim succeeds.
    pub fn claim_ticker(&mut self, tab: &str, now_ms: f64) -> bool {
        let key = self.config.ticker_lease_key.clone();
        let current = match self.storage.get(&key) {
            Ok(raw) => raw.as_deref().and_then(TickerLease::decode),
            Err(_) => return true,
        };
        if let Some(lease) = current {
            if lease.holder != tab && lease.expires_at > now_ms {
                return false;
            }
        }

        let lease = TickerLease {
            holder: tab.to_string(),
            expires_at: now_ms + self.config.ticker_lease_ms as f64,
        };
        let written = lease
            .encode()
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set(&key, &json));
        if let Err(e) = written {
            log::warn(&format!("cannot renew ticker lease: {e}"));
        }
        true
    }

    /// Give up the lease if `tab` holds it, so another tab takes over at once.
    pub fn release_ticker(&mut self, tab: &str) {
        let key = self.config.ticker_lease_key.clone();
        let held = matches!(
            self.storage.get(&key),
            Ok(Some(raw)) if TickerLease::decode(&raw).is_some_and(|l| l.holder == tab)
        );
        if held {
            self.remove_key(&key);
        }
    }

    fn commit(&mut self) {
        self.state.repair();
        self.state.refresh_derived();
        self.persist();
        self.notify();
    }

    fn persist(&mut self) {
        if let Err(e) = self.write_state() {
            log::warn(&format!("failed to save progress: {e}"));
        }
    }

    fn write_state(&mut self) -> Result<(), StorageError> {
        let json = save::encode(&self.state)?;
        self.storage.set(&self.config.storage_key, &json)
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    fn restore(&mut self) {
        let key = self.config.storage_key.clone();
        let mut loaded = false;

        match self.storage.get(&key) {
            Ok(Some(raw)) => match save::decode(&raw) {
                Decoded::Current(state) => {
                    self.state = state;
                    self.load_outcome = LoadOutcome::Restored;
                    loaded = true;
                }
                Decoded::Migrated(state) => {
                    log::info("migrating saved progress from an older format");
                    self.state = state;
                    self.load_outcome = LoadOutcome::Migrated;
                    loaded = true;
                }
                Decoded::Unrecognized => {
                    log::warn("saved progress is unreadable, starting over");
                    self.load_outcome = LoadOutcome::Discarded;
                    self.remove_key(&key);
                }
            },
            Ok(None) => {}
            Err(e) => {
                log::warn(&format!("cannot read saved progress: {e}"));
                return;
            }
        }

        for legacy in self.config.legacy_keys.clone() {
            let raw = match self.storage.get(&legacy) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => {
                    log::warn(&format!("cannot read `{legacy}`: {e}"));
                    continue;
                }
            };
            if !loaded {
                if let Decoded::Migrated(state) | Decoded::Current(state) = save::decode(&raw) {
                    log::info(&format!("migrating progress from `{legacy}`"));
                    self.state = state;
                    self.load_outcome = LoadOutcome::Migrated;
                    loaded = true;
                }
            }
            self.remove_key(&legacy);
        }

        self.state.repair();
        self.state.refresh_derived();
        if self.load_outcome == LoadOutcome::Migrated {
            self.persist();
        }
    }

    fn remove_key(&mut self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            log::warn(&format!("cannot remove `{key}`: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::clicker::storage::MemoryStorage;

    fn fresh() -> (ProgressionStore, MemoryStorage) {
        let storage = MemoryStorage::default();
        let store = ProgressionStore::load(Box::new(storage.clone()), ClickerConfig::default());
        (store, storage)
    }

    fn with_resources(amount: f64) -> (ProgressionStore, MemoryStorage) {
        let storage = MemoryStorage::with_entry(
            "clicker-state",
            &format!(
                r#"{{"version":2,"resourceCount":{amount},"ownedBuildings":{{}},"purchasedUpgrades":[]}}"#
            ),
        );
        let store = ProgressionStore::load(Box::new(storage.clone()), ClickerConfig::default());
        (store, storage)
    }

    fn stored(storage: &MemoryStorage) -> ProgressionState {
        match save::decode(&storage.peek("clicker-state").expect("nothing persisted")) {
            Decoded::Current(state) => state,
            other => panic!("unexpected persisted value: {other:?}"),
        }
    }

    #[test]
    fn empty_storage_starts_fresh() {
        let (store, storage) = fresh();
        assert_eq!(store.snapshot(), &ProgressionState::default());
        assert_eq!(store.load_outcome(), &LoadOutcome::Fresh);
        assert_eq!(storage.peek("clicker-state"), None);
    }

    #[test]
    fn three_cursor_purchases() {
        let (mut store, _) = with_resources(100.0);
        let mut spent = Vec::new();
        for _ in 0..3 {
            let before = store.snapshot().resource_count;
            assert!(store.purchase_building("cursor"));
            spent.push(before - store.snapshot().resource_count);
        }
        assert_eq!(spent, vec![15.0, 18.0, 20.0]);
        assert_eq!(store.snapshot().owned("cursor"), 3);
        assert!((store.snapshot().total_yield_per_second() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn unaffordable_building_changes_nothing() {
        let (mut store, storage) = with_resources(14.0);
        let before = store.snapshot().clone();
        assert!(!store.purchase_building("cursor"));
        assert_eq!(store.snapshot(), &before);
        assert_eq!(stored(&storage).resource_count, 14.0);
    }

    #[test]
    fn oversized_stored_count_is_capped_and_never_wraps() {
        let storage = MemoryStorage::with_entry(
            "clicker-state",
            r#"{"version":2,"resourceCount":100,"ownedBuildings":{"cursor":4294967295},"purchasedUpgrades":[]}"#,
        );
        let mut store = ProgressionStore::load(Box::new(storage), ClickerConfig::default());
        assert_eq!(store.snapshot().owned("cursor"), MAX_OWNED);

        let cursor = catalog::building("cursor").unwrap();
        assert!(calc::next_building_cost(store.snapshot(), cursor) > 100.0);
        assert!(!store.purchase_building("cursor"));
        assert_eq!(store.snapshot().owned("cursor"), MAX_OWNED);
        assert_eq!(store.snapshot().resource_count, 100.0);
    }

    #[test]
    fn huge_totals_do_not_break_unlocks() {
        let storage = MemoryStorage::with_entry(
            "clicker-state",
            r#"{"version":2,"resourceCount":1e9,"ownedBuildings":{"cursor":4000000000,"intern":4000000000},"purchasedUpgrades":[]}"#,
        );
        let mut store = ProgressionStore::load(Box::new(storage), ClickerConfig::default());
        let click_1 = catalog::upgrade("click-1").unwrap();
        assert!(calc::is_upgrade_available(store.snapshot(), click_1));
        assert!(store.purchase_upgrade("click-1"));
    }

    #[test]
    fn unknown_building_is_rejected() {
        let (mut store, _) = with_resources(1e9);
        assert!(!store.purchase_building("rocket"));
        assert!(store.snapshot().owned_buildings.is_empty());
    }

    #[test]
    fn exact_balance_is_enough() {
        let (mut store, _) = with_resources(15.0);
        assert!(store.purchase_building("cursor"));
        assert_eq!(store.snapshot().resource_count, 0.0);
    }

    #[test]
    fn tier_upgrade_after_two_units() {
        let (mut store, _) = with_resources(1_000.0);
        assert!(store.purchase_building("cursor"));
        assert!(store.purchase_building("cursor"));
        assert!(store.purchase_upgrade("cursor-1"));
        assert!((store.snapshot().total_yield_per_second() - 0.1 * 2.0 * 2.0).abs() < 1e-9);
    }

    #[test]
    fn locked_upgrade_is_rejected() {
        let (mut store, _) = with_resources(1_000.0);
        assert!(!store.purchase_upgrade("cursor-1"));
        assert_eq!(store.snapshot().resource_count, 1_000.0);
    }

    #[test]
    fn upgrade_cannot_be_bought_twice() {
        let (mut store, _) = with_resources(1_000.0);
        store.purchase_building("cursor");
        assert!(store.purchase_upgrade("cursor-1"));
        let after_first = store.snapshot().resource_count;
        assert!(!store.purchase_upgrade("cursor-1"));
        assert_eq!(store.snapshot().resource_count, after_first);
        assert_eq!(store.snapshot().purchased_upgrades.len(), 1);
    }

    #[test]
    fn unaffordable_upgrade_is_rejected() {
        let (mut store, _) = with_resources(160.0);
        store.purchase_building("cursor"); // 145 left, upgrade costs 150
        assert!(!store.purchase_upgrade("cursor-1"));
        assert!(!store.snapshot().has_upgrade("cursor-1"));
    }

    #[test]
    fn manual_gain_without_buildings_is_one() {
        let (mut store, _) = fresh();
        assert_eq!(store.apply_manual_gain(), 1.0);
        assert_eq!(store.apply_manual_gain(), 1.0);
        assert_eq!(store.snapshot().resource_count, 2.0);
    }

    #[test]
    fn passive_gain_uses_yield() {
        let (mut store, _) = with_resources(115.0);
        store.purchase_building("intern"); // 1/s
        store.apply_passive_gain(0.5);
        assert!((store.snapshot().resource_count - 15.5).abs() < 1e-9);
    }

    #[test]
    fn passive_gain_ignores_bad_deltas() {
        let (mut store, _) = with_resources(115.0);
        store.purchase_building("intern");
        let before = store.snapshot().resource_count;
        store.apply_passive_gain(-1.0);
        store.apply_passive_gain(f64::NAN);
        store.apply_passive_gain(f64::INFINITY);
        assert_eq!(store.snapshot().resource_count, before);
    }

    #[test]
    fn reset_restores_default_and_persists() {
        let (mut store, storage) = with_resources(500.0);
        store.purchase_building("intern");
        store.reset();
        assert_eq!(store.snapshot(), &ProgressionState::default());
        assert_eq!(stored(&storage), ProgressionState::default());
    }

    #[test]
    fn every_mutation_is_persisted() {
        let (mut store, storage) = fresh();
        store.apply_manual_gain();
        assert_eq!(stored(&storage).resource_count, 1.0);
        for _ in 0..20 {
            store.apply_manual_gain();
        }
        store.purchase_building("cursor");
        let persisted = stored(&storage);
        assert_eq!(persisted.owned("cursor"), 1);
        assert_eq!(&persisted, store.snapshot());
    }

    #[test]
    fn subscribers_see_each_mutation() {
        let (mut store, _) = fresh();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(move |s| sink.borrow_mut().push(s.resource_count));

        store.apply_manual_gain();
        store.apply_manual_gain();
        assert_eq!(*seen.borrow(), vec![1.0, 2.0]);

        assert!(store.unsubscribe(id));
        store.apply_manual_gain();
        assert_eq!(seen.borrow().len(), 2);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn rejected_purchase_does_not_notify() {
        let (mut store, _) = fresh();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        store.subscribe(move |_| *counter.borrow_mut() += 1);
        store.purchase_building("cursor");
        store.purchase_upgrade("click-1");
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn restores_current_format() {
        let storage = MemoryStorage::with_entry(
            "clicker-state",
            r#"{"version":2,"resourceCount":12.5,"ownedBuildings":{"intern":2},"purchasedUpgrades":["intern-1"]}"#,
        );
        let store = ProgressionStore::load(Box::new(storage), ClickerConfig::default());
        assert_eq!(store.load_outcome(), &LoadOutcome::Restored);
        assert_eq!(store.snapshot().resource_count, 12.5);
        assert!((store.snapshot().total_yield_per_second() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn legacy_count_key_is_migrated_and_removed() {
        let storage = MemoryStorage::with_entry("clicker-count", "321");
        let store = ProgressionStore::load(Box::new(storage.clone()), ClickerConfig::default());

        assert_eq!(store.load_outcome(), &LoadOutcome::Migrated);
        let expected = ProgressionState::with_resources(321.0);
        assert_eq!(store.snapshot(), &expected);
        assert_eq!(store.snapshot().total_yield_per_second(), 0.0);
        assert_eq!(storage.peek("clicker-count"), None);
        assert_eq!(stored(&storage), expected);
    }

    #[test]
    fn stale_legacy_key_is_removed_when_current_exists() {
        let storage = MemoryStorage::with_entry(
            "clicker-state",
            r#"{"resourceCount":5,"ownedBuildings":{},"purchasedUpgrades":[]}"#,
        );
        let mut writer = storage.clone();
        writer.set("clicker-count", "9999").unwrap();

        let store = ProgressionStore::load(Box::new(storage.clone()), ClickerConfig::default());
        assert_eq!(store.snapshot().resource_count, 5.0);
        assert_eq!(storage.peek("clicker-count"), None);
    }

    #[test]
    fn legacy_shape_under_current_key_is_migrated() {
        let storage =
            MemoryStorage::with_entry("clicker-state", r#"{"count":64,"clickPower":4}"#);
        let store = ProgressionStore::load(Box::new(storage.clone()), ClickerConfig::default());
        assert_eq!(store.load_outcome(), &LoadOutcome::Migrated);
        assert_eq!(store.snapshot().resource_count, 64.0);
        assert_eq!(stored(&storage).resource_count, 64.0);
    }

    #[test]
    fn corrupt_save_is_discarded() {
        let storage = MemoryStorage::with_entry("clicker-state", "{{{{");
        let store = ProgressionStore::load(Box::new(storage.clone()), ClickerConfig::default());
        assert_eq!(store.load_outcome(), &LoadOutcome::Discarded);
        assert_eq!(store.snapshot(), &ProgressionState::default());
        assert_eq!(storage.peek("clicker-state"), None);
    }

    #[test]
    fn unavailable_storage_keeps_working_in_memory() {
        let mut store =
            ProgressionStore::load(Box::new(MemoryStorage::unavailable()), ClickerConfig::default());
        assert_eq!(store.load_outcome(), &LoadOutcome::Fresh);
        for _ in 0..15 {
            store.apply_manual_gain();
        }
        assert!(store.purchase_building("cursor"));
        assert_eq!(store.snapshot().owned("cursor"), 1);
    }

    #[test]
    fn sync_adopts_current_format_from_other_tab() {
        let (mut store, _) = fresh();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        let raw = r#"{"version":2,"resourceCount":88,"ownedBuildings":{"cursor":1},"purchasedUpgrades":[]}"#;
        assert!(store.sync_from_storage(Some(raw)));
        assert_eq!(store.snapshot().resource_count, 88.0);
        assert_eq!(store.snapshot().owned("cursor"), 1);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn only_one_tab_holds_the_ticker() {
        let (mut a, storage) = fresh();
        let mut b = ProgressionStore::load(Box::new(storage.clone()), ClickerConfig::default());

        assert!(a.claim_ticker("a", 0.0));
        assert!(!b.claim_ticker("b", 500.0));
        assert!(a.claim_ticker("a", 900.0));
        assert!(!b.claim_ticker("b", 1_800.0));

        // a stops renewing; the lease runs out at 1900
        assert!(b.claim_ticker("b", 1_900.0));
        assert!(!a.claim_ticker("a", 2_000.0));
    }

    #[test]
    fn released_ticker_is_free_at_once() {
        let (mut a, storage) = fresh();
        let mut b = ProgressionStore::load(Box::new(storage.clone()), ClickerConfig::default());
        assert!(a.claim_ticker("a", 0.0));

        b.release_ticker("b");
        assert!(!b.claim_ticker("b", 10.0));

        a.release_ticker("a");
        assert_eq!(storage.peek("clicker-ticker"), None);
        assert!(b.claim_ticker("b", 10.0));
    }

    #[test]
    fn unreadable_lease_is_free() {
        let (mut store, storage) = fresh();
        let mut writer = storage.clone();
        writer.set("clicker-ticker", "not a lease").unwrap();
        assert!(store.claim_ticker("a", 0.0));

        let mut offline =
            ProgressionStore::load(Box::new(MemoryStorage::unavailable()), ClickerConfig::default());
        assert!(offline.claim_ticker("a", 0.0));
    }

    #[test]
    fn sync_ignores_invalid_values() {
        let (mut store, _) = with_resources(3.0);
        assert!(!store.sync_from_storage(None));
        assert!(!store.sync_from_storage(Some("garbage")));
        assert!(!store.sync_from_storage(Some("12")));
        assert_eq!(store.snapshot().resource_count, 3.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::clicker::storage::MemoryStorage;
    use proptest::prelude::*;

    fn store_with(amount: f64, owned: &[u32]) -> ProgressionStore {
        let buildings: Vec<String> = catalog::BUILDINGS
            .iter()
            .zip(owned)
            .map(|(b, n)| format!(r#""{}":{}"#, b.id, n))
            .collect();
        let raw = format!(
            r#"{{"resourceCount":{amount},"ownedBuildings":{{{}}},"purchasedUpgrades":[]}}"#,
            buildings.join(",")
        );
        let storage = MemoryStorage::with_entry("clicker-state", &raw);
        ProgressionStore::load(Box::new(storage), ClickerConfig::default())
    }

    fn arb_owned() -> impl Strategy<Value = Vec<u32>> {
        proptest::collection::vec(0u32..50, catalog::BUILDINGS.len())
    }

    proptest! {
        #[test]
        fn prop_purchase_is_exact_or_noop(
            amount in 0.0f64..200_000.0,
            owned in arb_owned(),
            idx in 0usize..5,
        ) {
            let mut store = store_with(amount, &owned);
            let def = &catalog::BUILDINGS[idx];
            let before = store.snapshot().clone();
            let cost = calc::next_building_cost(&before, def);

            let bought = store.purchase_building(def.id);
            let after = store.snapshot();
            if before.resource_count < cost {
                prop_assert!(!bought);
                prop_assert_eq!(after, &before);
            } else {
                prop_assert!(bought);
                prop_assert_eq!(after.resource_count, before.resource_count - cost);
                prop_assert_eq!(after.owned(def.id), before.owned(def.id) + 1);
            }
            prop_assert!(after.resource_count >= 0.0);
        }

        #[test]
        fn prop_passive_gain_is_linear(
            owned in arb_owned(),
            delta in 0.0f64..100.0,
        ) {
            let mut twice = store_with(0.0, &owned);
            let mut once = store_with(0.0, &owned);
            twice.apply_passive_gain(delta);
            twice.apply_passive_gain(delta);
            once.apply_passive_gain(2.0 * delta);
            let a = twice.snapshot().resource_count;
            let b = once.snapshot().resource_count;
            prop_assert!((a - b).abs() <= 1e-9 * b.max(1.0), "{} vs {}", a, b);
        }

        #[test]
        fn prop_yield_tracks_calculator(owned in arb_owned()) {
            let store = store_with(0.0, &owned);
            prop_assert_eq!(
                store.snapshot().total_yield_per_second(),
                calc::total_yield_per_second(store.snapshot())
            );
        }

        #[test]
        fn prop_reset_returns_default(amount in 0.0f64..1e9, owned in arb_owned()) {
            let mut store = store_with(amount, &owned);
            store.reset();
            prop_assert_eq!(store.snapshot(), &ProgressionState::default());
        }
    }
}
