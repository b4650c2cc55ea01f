mod clicker;
mod input;
mod log;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use clicker::config::ClickerConfig;
use clicker::storage::Storage;
use clicker::store::{LoadOutcome, ProgressionStore};
use clicker::ticker::TickDriver;
use clicker::ClickerGame;
use input::{pixel_x_to_col, pixel_y_to_row, HitMap, InputEvent};

#[cfg(target_arch = "wasm32")]
type Timer = clicker::ticker::BrowserInterval;
#[cfg(not(target_arch = "wasm32"))]
type Timer = clicker::ticker::ManualInterval;

#[cfg(target_arch = "wasm32")]
fn open_storage() -> Box<dyn Storage> {
    Box::new(clicker::storage::LocalStorage)
}

#[cfg(not(target_arch = "wasm32"))]
fn open_storage() -> Box<dyn Storage> {
    Box::new(clicker::storage::MemoryStorage::default())
}

/// Query the grid container's bounding rect and convert a pointer position
/// to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, hits: &HitMap) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), hits.cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), hits.rows)?;
    Some((col, row))
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Random id for this tab's claim on the ticker lease.
fn tab_id() -> String {
    let nonce = (js_sys::Math::random() * f64::from(u32::MAX)) as u32;
    format!("tab-{:x}-{nonce:08x}", now_ms() as u64)
}

/// Adopt saves written by other tabs, and stop ticking (handing the lease to
/// another tab) when the page goes away.
#[cfg(target_arch = "wasm32")]
fn install_page_listeners(
    store: &Rc<RefCell<ProgressionStore>>,
    driver: &Rc<RefCell<TickDriver<Timer>>>,
) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };

    let on_storage = Closure::<dyn FnMut(web_sys::StorageEvent)>::new({
        let store = Rc::clone(store);
        move |event: web_sys::StorageEvent| {
            let Ok(mut store) = store.try_borrow_mut() else {
                return;
            };
            if event.key().as_deref() != Some(store.config().storage_key.as_str()) {
                return;
            }
            if store.sync_from_storage(event.new_value().as_deref()) {
                log::info("picked up progress from another tab");
            }
        }
    });
    if let Err(e) =
        window.add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref())
    {
        log::warn(&format!("cross-tab sync disabled: {e:?}"));
    }
    on_storage.forget();

    let on_pagehide = Closure::<dyn FnMut()>::new({
        let driver = Rc::clone(driver);
        move || {
            if let Ok(mut driver) = driver.try_borrow_mut() {
                driver.stop();
            }
        }
    });
    if let Err(e) =
        window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())
    {
        log::warn(&format!("pagehide listener failed: {e:?}"));
    }
    on_pagehide.forget();
}

#[cfg(not(target_arch = "wasm32"))]
fn install_page_listeners(
    _store: &Rc<RefCell<ProgressionStore>>,
    _driver: &Rc<RefCell<TickDriver<Timer>>>,
) {
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let config = ClickerConfig::default();
    let tick_ms = config.tick_interval_ms;
    let store = Rc::new(RefCell::new(ProgressionStore::load(open_storage(), config)));
    if *store.borrow().load_outcome() != LoadOutcome::Fresh {
        log::info(&format!("progress loaded: {:?}", store.borrow().load_outcome()));
    }

    let game = Rc::new(RefCell::new(ClickerGame::new(Rc::clone(&store))));

    let driver = Rc::new(RefCell::new(
        TickDriver::new(Rc::clone(&store), Timer::default(), tick_ms)
            .shared(tab_id(), Rc::new(now_ms)),
    ));
    driver.borrow_mut().start();
    install_page_listeners(&store, &driver);

    let hit_map = Rc::new(RefCell::new(HitMap::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let hit_map = hit_map.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let hits = hit_map.borrow();
            if hits.rows == 0 || hits.cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &hits) else {
                return;
            };
            let hit = hits.hit_test(col, row);
            drop(hits);

            if let Some(action) = hit {
                game.borrow_mut()
                    .handle_input(&InputEvent::Click(action), now_ms());
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut()
                    .handle_input(&InputEvent::Key(c.to_ascii_lowercase()), now_ms());
            }
        }
    });

    terminal.draw_web({
        let hit_map = hit_map.clone();
        move |f| {
            // The render loop owns the driver, so ticking lasts as long as the page.
            let _driver = &driver;

            let size = f.area();
            {
                let mut hits = hit_map.borrow_mut();
                hits.cols = size.width;
                hits.rows = size.height;
                hits.clear();
            }
            game.borrow().render(f, size, &hit_map, now_ms());
        }
    });

    Ok(())
}
