//! Runtime configuration for the clicker widget.

/// localStorage key holding the current save format.
pub const STORAGE_KEY: &str = "clicker-state";

/// Key written by the first version of the widget (a bare click count).
pub const LEGACY_COUNT_KEY: &str = "clicker-count";

/// Key naming the tab that currently accrues passive income.
pub const TICKER_LEASE_KEY: &str = "clicker-ticker";

/// Passive income is applied every 100 ms (10 ticks/sec).
pub const TICK_INTERVAL_MS: u32 = 100;

/// A ticking tab renews its lease on every tick; another tab may take over
/// once it has gone this long without renewal.
pub const TICKER_LEASE_MS: u32 = 1_000;

/// Where state is persisted and how often passive income is applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickerConfig {
    pub storage_key: String,
    pub legacy_keys: Vec<String>,
    pub tick_interval_ms: u32,
    pub ticker_lease_key: String,
    pub ticker_lease_ms: u32,
}

impl Default for ClickerConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            legacy_keys: vec![LEGACY_COUNT_KEY.to_string()],
            tick_interval_ms: TICK_INTERVAL_MS,
            ticker_lease_key: TICKER_LEASE_KEY.to_string(),
            ticker_lease_ms: TICKER_LEASE_MS,
        }
    }
}
