//! Title ladder shown under the counter.

/// `(threshold, title)` in ascending order.
pub const MILESTONES: &[(u64, &str)] = &[
    (0, "Click to begin..."),
    (1, "Curious Clicker"),
    (10, "Casual Tapper"),
    (50, "Committed Clicker"),
    (100, "Centurion"),
    (250, "Habitual Hitter"),
    (500, "Click Apprentice"),
    (1_000, "Kilo Clicker"),
    (2_500, "Click Addict"),
    (5_000, "Click Wizard"),
    (10_000, "Ascended"),
];

/// Highest title whose threshold `count` has reached.
pub fn title(count: u64) -> &'static str {
    MILESTONES
        .iter()
        .take_while(|(threshold, _)| count >= *threshold)
        .last()
        .map_or(MILESTONES[0].1, |(_, t)| *t)
}

/// The next title still out of reach.
pub fn next(count: u64) -> Option<(u64, &'static str)> {
    MILESTONES.iter().copied().find(|(threshold, _)| *threshold > count)
}
