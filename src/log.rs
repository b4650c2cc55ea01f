//! Browser console logging.
//!
//! Messages go to `console.log` / `console.warn` on wasm32. Native builds
//! (unit tests) drop them.

const PREFIX: &str = "Clicker";

/// Informational message (loads, migrations, timer lifecycle).
pub fn info(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("{PREFIX}: {msg}").into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (PREFIX, msg);
}

/// Recoverable failure that was swallowed (storage errors, corrupt saves).
pub fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&format!("{PREFIX}: {msg}").into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (PREFIX, msg);
}
