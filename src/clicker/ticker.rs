//! Fixed-interval passive income.
//!
//! The driver credits `interval / 1000` seconds of yield on every timer
//! firing. It never measures elapsed time, so a throttled background tab
//! simply earns less; long-run drift is accepted for a cosmetic widget.
//!
//! With several tabs open each one runs a driver, but a driver that shares
//! storage with other tabs only credits income while its tab holds the
//! ticker lease (see [`ProgressionStore::claim_ticker`]).

use std::cell::RefCell;
use std::rc::Rc;

use super::store::ProgressionStore;
use crate::log;

/// A repeating timer.
pub trait IntervalTimer {
    /// Call `callback` every `interval_ms` until [`stop`](Self::stop).
    fn start(&mut self, interval_ms: u32, callback: Box<dyn FnMut()>);
    fn stop(&mut self);
}

/// Clock in ms since the epoch.
pub type Clock = Rc<dyn Fn() -> f64>;

/// Identity of this tab and the clock its lease is measured with.
struct TabLease {
    tab_id: String,
    clock: Clock,
}

/// Owns the passive-income timer. Dropping the driver cancels it.
pub struct TickDriver<T: IntervalTimer> {
    store: Rc<RefCell<ProgressionStore>>,
    timer: T,
    interval_ms: u32,
    running: bool,
    lease: Option<Rc<TabLease>>,
}

impl<T: IntervalTimer> TickDriver<T> {
    pub fn new(store: Rc<RefCell<ProgressionStore>>, timer: T, interval_ms: u32) -> Self {
        Self {
            store,
            timer,
            interval_ms: interval_ms.max(1),
            running: false,
            lease: None,
        }
    }

    /// Only tick while `tab_id` holds the ticker lease in shared storage.
    pub fn shared(mut self, tab_id: impl Into<String>, clock: Clock) -> Self {
        self.lease = Some(Rc::new(TabLease {
            tab_id: tab_id.into(),
            clock,
        }));
        self
    }

    /// Seconds credited per tick.
    pub fn delta_seconds(&self) -> f64 {
        self.interval_ms as f64 / 1000.0
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start ticking. No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        let store = Rc::clone(&self.store);
        let lease = self.lease.clone();
        let delta = self.delta_seconds();
        self.timer.start(
            self.interval_ms,
            Box::new(move || {
                // Skip the tick rather than panic if something still holds a borrow.
                let Ok(mut store) = store.try_borrow_mut() else {
                    return;
                };
                let leading = match &lease {
                    Some(lease) => store.claim_ticker(&lease.tab_id, (lease.clock)()),
                    None => true,
                };
                if leading {
                    store.apply_passive_gain(delta);
                }
            }),
        );
        self.running = true;
        log::info(&format!("passive income every {} ms", self.interval_ms));
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.timer.stop();
        self.running = false;
        if let Some(lease) = &self.lease {
            if let Ok(mut store) = self.store.try_borrow_mut() {
                store.release_ticker(&lease.tab_id);
            }
        }
    }
}

impl<T: IntervalTimer> Drop for TickDriver<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// `window.setInterval` backed timer.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct BrowserInterval {
    handle: Option<i32>,
    closure: Option<wasm_bindgen::closure::Closure<dyn FnMut()>>,
}

#[cfg(target_arch = "wasm32")]
impl IntervalTimer for BrowserInterval {
    fn start(&mut self, interval_ms: u32, callback: Box<dyn FnMut()>) {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        self.stop();
        let Some(window) = web_sys::window() else {
            log::warn("no window, passive income disabled");
            return;
        };
        let closure = Closure::wrap(callback);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.closure = Some(closure);
            }
            Err(e) => log::warn(&format!("setInterval failed: {e:?}")),
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
        self.closure = None;
    }
}

/// A timer that only fires when told to. Clones share the same callback.
///
/// Stands in for the browser timer off-wasm and in tests.
#[derive(Clone, Default)]
pub struct ManualInterval {
    callback: Rc<RefCell<Option<Box<dyn FnMut()>>>>,
}

impl ManualInterval {
    /// Run the callback `times` times. Returns how many actually ran.
    #[cfg(test)]
    pub fn fire(&self, times: u32) -> u32 {
        let mut fired = 0;
        for _ in 0..times {
            match self.callback.borrow_mut().as_mut() {
                Some(cb) => cb(),
                None => break,
            }
            fired += 1;
        }
        fired
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.callback.borrow().is_some()
    }
}

impl IntervalTimer for ManualInterval {
    fn start(&mut self, _interval_ms: u32, callback: Box<dyn FnMut()>) {
        *self.callback.borrow_mut() = Some(callback);
    }

    fn stop(&mut self) {
        *self.callback.borrow_mut() = None;
    }
}
