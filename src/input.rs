//! Pointer and keyboard input.
//!
//! Each frame, render code records which screen cells trigger which action
//! in a [`HitMap`]; the pointer handler then resolves a tap to an action ID.

use ratzilla::ratatui::layout::Rect;

/// Normalised input handed to the game.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A tap that landed on a registered region.
    Click(u16),
}

#[derive(Debug, Clone)]
pub struct HitRegion {
    pub rect: Rect,
    pub action: u16,
}

/// Tappable regions from the last frame plus the grid size in cells.
#[derive(Debug, Default)]
pub struct HitMap {
    pub regions: Vec<HitRegion>,
    pub cols: u16,
    pub rows: u16,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn add_region(&mut self, rect: Rect, action: u16) {
        self.regions.push(HitRegion { rect, action });
    }

    /// One full-width row of `area`. Rows outside `area` are dropped.
    pub fn add_row(&mut self, area: Rect, row: u16, action: u16) {
        let inside = (area.y..area.y.saturating_add(area.height)).contains(&row);
        if inside {
            self.add_region(Rect::new(area.x, row, area.width, 1), action);
        }
    }

    /// Regions for a single-line tab strip laid out left to right.
    ///
    /// `tabs` is `(label width, action)` in order, with `gap` columns of
    /// separator between labels. Each gap is split between its two
    /// neighbours (the left one gets the odd column), and the first and last
    /// tab extend to the strip's edges.
    pub fn add_tabs(&mut self, tabs: &[(u16, u16)], gap: u16, area: Rect) {
        if tabs.is_empty() || area.width == 0 {
            return;
        }

        // Column span of each label, relative to area.x.
        let mut spans = Vec::with_capacity(tabs.len());
        let mut x = 0u16;
        for &(width, _) in tabs {
            spans.push((x, x + width));
            x += width + gap;
        }

        let last = tabs.len() - 1;
        for (i, &(_, action)) in tabs.iter().enumerate() {
            let from = if i == 0 { 0 } else { spans[i].0 - gap / 2 };
            let to = if i == last {
                area.width
            } else {
                spans[i].1 + (gap - gap / 2)
            };
            let width = to.min(area.width).saturating_sub(from);
            if width > 0 {
                self.add_region(Rect::new(area.x + from, area.y, width, area.height), action);
            }
        }
    }

    /// Action at `(col, row)`. When regions overlap, the one added last wins.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.regions
            .iter()
            .rev()
            .find(|r| {
                let Rect { x, y, width, height } = r.rect;
                (x..x + width).contains(&col) && (y..y + height).contains(&row)
            })
            .map(|r| r.action)
    }
}

/// Below this width the widget drops side borders and the log panel.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Row under a pointer `offset_y` pixels below the top of the grid.
pub fn pixel_y_to_row(offset_y: f64, grid_height: f64, rows: u16) -> Option<u16> {
    pixel_to_cell(offset_y, grid_height, rows)
}

/// Column under a pointer `offset_x` pixels right of the grid's left edge.
pub fn pixel_x_to_col(offset_x: f64, grid_width: f64, cols: u16) -> Option<u16> {
    pixel_to_cell(offset_x, grid_width, cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset * cells as f64 / extent) as u16;
    (cell < cells).then_some(cell)
}
