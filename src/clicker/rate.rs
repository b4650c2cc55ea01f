//! Rolling clicks-per-second readout.

use std::collections::VecDeque;

/// Clicks are counted over the last three seconds.
pub const WINDOW_MS: f64 = 3_000.0;

#[derive(Debug, Default)]
pub struct ClickRate {
    timestamps: VecDeque<f64>,
}

impl ClickRate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, now_ms: f64) {
        self.timestamps.push_back(now_ms);
        self.prune(now_ms);
    }

    /// Clicks per second over the window, one decimal.
    pub fn per_second(&self, now_ms: f64) -> f64 {
        let recent = self
            .timestamps
            .iter()
            .filter(|&&t| now_ms - t < WINDOW_MS)
            .count();
        if recent == 0 {
            return 0.0;
        }
        let rate = recent as f64 / (WINDOW_MS / 1000.0);
        (rate * 10.0).round() / 10.0
    }

    pub fn clear(&mut self) {
        self.timestamps.clear();
    }

    fn prune(&mut self, now_ms: f64) {
        while let Some(&t) = self.timestamps.front() {
            if now_ms - t < WINDOW_MS {
                break;
            }
            self.timestamps.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_is_zero() {
        let rate = ClickRate::new();
        assert_eq!(rate.per_second(1_000.0), 0.0);
    }

    #[test]
    fn averages_over_window() {
        let mut rate = ClickRate::new();
        for i in 0..6 {
            rate.record(i as f64 * 100.0);
        }
        // 6 clicks / 3 s
        assert_eq!(rate.per_second(600.0), 2.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        let mut rate = ClickRate::new();
        rate.record(0.0);
        // 1 / 3 = 0.333…
        assert_eq!(rate.per_second(10.0), 0.3);
    }

    #[test]
    fn old_clicks_fall_out() {
        let mut rate = ClickRate::new();
        rate.record(0.0);
        rate.record(2_000.0);
        assert_eq!(rate.per_second(2_999.0), 0.7);
        assert_eq!(rate.per_second(3_000.0), 0.3);
        assert_eq!(rate.per_second(5_000.0), 0.0);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut rate = ClickRate::new();
        rate.record(0.0);
        rate.clear();
        assert_eq!(rate.per_second(1.0), 0.0);
    }
}
