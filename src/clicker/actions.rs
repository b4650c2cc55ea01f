//! Action IDs for clicker click targets, and their keyboard shortcuts.

pub const CLICK: u16 = 0;
pub const RESET: u16 = 1;

pub const TAB_BUILDINGS: u16 = 10;
pub const TAB_UPGRADES: u16 = 11;

pub const SCROLL_UP: u16 = 12;
pub const SCROLL_DOWN: u16 = 13;

/// Building purchase: base + index into `BUILDINGS`.
pub const BUY_BUILDING_BASE: u16 = 100;

/// Upgrade purchase: base + index into the listed (unpurchased) upgrades.
pub const BUY_UPGRADE_BASE: u16 = 200;

pub const KEY_CLICK: char = 'c';
pub const KEY_RESET: char = 'r';
pub const KEY_BUILDINGS: char = 'b';
pub const KEY_UPGRADES: char = 'u';
pub const KEY_SCROLL_UP: char = 'w';
pub const KEY_SCROLL_DOWN: char = 's';

/// Shortcuts for listed upgrades, in display order.
pub const UPGRADE_KEYS: &[char] = &[
    'a', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q',
];

pub fn upgrade_key(display_idx: usize) -> Option<char> {
    UPGRADE_KEYS.get(display_idx).copied()
}

pub fn upgrade_index(key: char) -> Option<usize> {
    UPGRADE_KEYS.iter().position(|&k| k == key)
}
