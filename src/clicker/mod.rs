//! Portfolio clicker: an idle counter with buildings, upgrades and titles.
//!
//! [`store::ProgressionStore`] owns the numbers; this module only turns
//! input into store operations and keeps the presentation-side state
//! (current tab, click rate, event log) that is never persisted.

pub mod actions;
pub mod calc;
pub mod catalog;
pub mod config;
pub mod format;
pub mod milestone;
pub mod rate;
pub mod render;
pub mod save;
pub mod state;
pub mod storage;
pub mod store;
pub mod ticker;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{HitMap, InputEvent};

use catalog::{UpgradeDef, BUILDINGS, UPGRADES};
use rate::ClickRate;
use state::ProgressionState;
use store::{ProgressionStore, SubscriptionId};

/// How long the "+N" popup stays after a click.
const GAIN_FLASH_MS: f64 = 600.0;

const LOG_CAPACITY: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Buildings,
    Upgrades,
}

/// Newest-first list of short messages for the side panel.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: VecDeque<String>,
}

impl EventLog {
    pub fn push(&mut self, msg: impl Into<String>) {
        self.entries.push_front(msg.into());
        self.entries.truncate(LOG_CAPACITY);
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Upgrades still for sale, in catalog order. Shortcut keys and click IDs
/// index into this list.
pub fn listed_upgrades(state: &ProgressionState) -> Vec<&'static UpgradeDef> {
    UPGRADES
        .iter()
        .filter(|u| !state.has_upgrade(u.id))
        .collect()
}

pub struct ClickerGame {
    store: Rc<RefCell<ProgressionStore>>,
    rate: ClickRate,
    view: View,
    reset_armed: bool,
    last_gain: Option<(f64, f64)>,
    /// First upgrade row shown. Clamped to what fits by each render.
    upgrade_scroll: Cell<usize>,
    log: Rc<RefCell<EventLog>>,
    subscription: SubscriptionId,
}

impl ClickerGame {
    pub fn new(store: Rc<RefCell<ProgressionStore>>) -> Self {
        let log = Rc::new(RefCell::new(EventLog::default()));

        // Title changes are announced no matter which path changed the count
        // (click, tick, or another tab).
        let mut title_rank = milestone_rank(store.borrow().snapshot().displayed_count());
        let listener_log = Rc::clone(&log);
        let subscription = store.borrow_mut().subscribe(move |state| {
            let rank = milestone_rank(state.displayed_count());
            if rank > title_rank {
                let title = milestone::title(state.displayed_count());
                listener_log.borrow_mut().push(format!("★ {title}"));
            }
            title_rank = rank;
        });

        Self {
            store,
            rate: ClickRate::new(),
            view: View::Buildings,
            reset_armed: false,
            last_gain: None,
            upgrade_scroll: Cell::new(0),
            log,
            subscription,
        }
    }

    #[cfg(test)]
    pub fn view(&self) -> View {
        self.view
    }

    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> bool {
        match *event {
            InputEvent::Key(key) => self.handle_key(key, now_ms),
            InputEvent::Click(id) => self.handle_click(id, now_ms),
        }
    }

    fn handle_key(&mut self, key: char, now_ms: f64) -> bool {
        match key {
            actions::KEY_CLICK | ' ' => self.click(now_ms),
            actions::KEY_RESET => self.reset(),
            actions::KEY_BUILDINGS => self.show(View::Buildings),
            actions::KEY_UPGRADES => self.show(View::Upgrades),
            _ if self.view == View::Buildings => {
                match BUILDINGS.iter().position(|b| b.key == key) {
                    Some(idx) => self.buy_building(idx),
                    None => false,
                }
            }
            actions::KEY_SCROLL_UP => self.scroll_upgrades(false),
            actions::KEY_SCROLL_DOWN => self.scroll_upgrades(true),
            _ => match actions::upgrade_index(key) {
                Some(idx) => self.buy_upgrade(idx),
                None => false,
            },
        }
    }

    fn handle_click(&mut self, id: u16, now_ms: f64) -> bool {
        match id {
            actions::CLICK => self.click(now_ms),
            actions::RESET => self.reset(),
            actions::TAB_BUILDINGS => self.show(View::Buildings),
            actions::TAB_UPGRADES => self.show(View::Upgrades),
            actions::SCROLL_UP => self.scroll_upgrades(false),
            actions::SCROLL_DOWN => self.scroll_upgrades(true),
            id if id >= actions::BUY_UPGRADE_BASE => {
                self.buy_upgrade((id - actions::BUY_UPGRADE_BASE) as usize)
            }
            id if id >= actions::BUY_BUILDING_BASE => {
                self.buy_building((id - actions::BUY_BUILDING_BASE) as usize)
            }
            _ => false,
        }
    }

    fn click(&mut self, now_ms: f64) -> bool {
        self.reset_armed = false;
        let gain = self.store.borrow_mut().apply_manual_gain();
        self.rate.record(now_ms);
        self.last_gain = Some((gain, now_ms + GAIN_FLASH_MS));
        true
    }

    fn show(&mut self, view: View) -> bool {
        self.reset_armed = false;
        self.view = view;
        true
    }

    fn scroll_upgrades(&mut self, down: bool) -> bool {
        let listed = listed_upgrades(self.store.borrow().snapshot()).len();
        let current = self.upgrade_scroll.get();
        let next = if down {
            (current + 1).min(listed.saturating_sub(1))
        } else {
            current.saturating_sub(1)
        };
        self.upgrade_scroll.set(next);
        next != current
    }

    /// First press arms, second press wipes progress.
    fn reset(&mut self) -> bool {
        if !self.reset_armed {
            self.reset_armed = true;
            return true;
        }
        self.reset_armed = false;
        self.store.borrow_mut().reset();
        self.rate.clear();
        self.last_gain = None;
        self.log.borrow_mut().push("Progress reset");
        true
    }

    fn buy_building(&mut self, idx: usize) -> bool {
        self.reset_armed = false;
        let Some(def) = BUILDINGS.get(idx) else {
            return false;
        };
        if self.store.borrow_mut().purchase_building(def.id) {
            let owned = self.store.borrow().snapshot().owned(def.id);
            self.log.borrow_mut().push(format!("Bought {} (#{owned})", def.name));
        }
        true
    }

    fn buy_upgrade(&mut self, display_idx: usize) -> bool {
        self.reset_armed = false;
        let def = listed_upgrades(self.store.borrow().snapshot())
            .get(display_idx)
            .copied();
        let Some(def) = def else {
            return false;
        };
        if self.store.borrow_mut().purchase_upgrade(def.id) {
            self.log.borrow_mut().push(format!("Upgrade: {}", def.name));
        }
        true
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        hit_map: &Rc<RefCell<HitMap>>,
        now_ms: f64,
    ) {
        let store = self.store.borrow();
        let log = self.log.borrow();
        let screen = render::Screen {
            state: store.snapshot(),
            view: self.view,
            reset_armed: self.reset_armed,
            clicks_per_second: self.rate.per_second(now_ms),
            recent_gain: self
                .last_gain
                .filter(|&(_, expires)| now_ms < expires)
                .map(|(amount, _)| amount),
            upgrade_scroll: &self.upgrade_scroll,
            log: &log,
        };
        render::render(&screen, f, area, hit_map);
    }
}

impl Drop for ClickerGame {
    fn drop(&mut self) {
        if let Ok(mut store) = self.store.try_borrow_mut() {
            store.unsubscribe(self.subscription);
        }
    }
}

fn milestone_rank(count: u64) -> usize {
    milestone::MILESTONES
        .iter()
        .take_while(|(threshold, _)| count >= *threshold)
        .count()
}
