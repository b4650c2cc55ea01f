//! Widgets that draw themselves and register their own hit regions.

use std::ops::Range;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::HitMap;

/// Horizontal tab strip, optionally framed.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action: u16) -> Self {
        self.tabs.push((label.into(), style, action));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, hits: &mut HitMap) {
        let gap = Line::from(self.separator).width() as u16;
        let separator = Span::styled(self.separator, Style::default().fg(Color::DarkGray));

        let mut spans = Vec::with_capacity(self.tabs.len() * 2);
        let mut layout = Vec::with_capacity(self.tabs.len());
        for (label, style, action) in self.tabs {
            if !layout.is_empty() {
                spans.push(separator.clone());
            }
            let text = format!(" {label} ");
            layout.push((Line::from(text.as_str()).width() as u16, action));
            spans.push(Span::styled(text, style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(spans)).block(block),
            None => Paragraph::new(Line::from(spans)),
        };
        f.render_widget(paragraph, area);

        // Inner columns, but the frame's full height so taps on the border count.
        hits.add_tabs(&layout, gap, Rect::new(inner.x, area.y, inner.width, area.height));
    }
}

/// Lines of a panel, some of which trigger an action when tapped.
///
/// A line's row is its index, so hit regions are only right while no line
/// wraps.
pub struct TapList<'a> {
    lines: Vec<Line<'a>>,
    taps: Vec<(usize, u16)>,
}

impl<'a> TapList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            taps: Vec::new(),
        }
    }

    /// A line with no action.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action: u16) {
        self.taps.push((self.lines.len(), action));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Append lines `range` of `other`, keeping their actions.
    pub fn append_range(&mut self, other: TapList<'a>, range: Range<usize>) {
        let TapList { lines, taps } = other;
        for (idx, line) in lines.into_iter().enumerate().take(range.end).skip(range.start) {
            match taps.iter().find(|&&(i, _)| i == idx) {
                Some(&(_, action)) => self.push_clickable(line, action),
                None => self.push(line),
            }
        }
    }

    /// Add a row region for every tappable line that fits inside `inner`,
    /// the content area of the panel.
    pub fn register(&self, inner: Rect, hits: &mut HitMap) {
        for &(idx, action) in &self.taps {
            if let Ok(offset) = u16::try_from(idx) {
                hits.add_row(inner, inner.y.saturating_add(offset), action);
            }
        }
    }

    /// Draw inside `block` and register tappable lines.
    pub fn render(self, f: &mut Frame, area: Rect, block: Block<'a>, hits: &mut HitMap) {
        self.register(block.inner(area), hits);
        f.render_widget(Paragraph::new(self.lines).block(block), area);
    }
}

/// The slice of a `total`-line list shown in `rows` rows when scrolled to
/// `offset`, and whether a "more" marker row sits above or below it.
///
/// Markers are only used when at least three rows are available; the
/// offset is clamped so the last line is never scrolled past.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollWindow {
    pub start: usize,
    pub end: usize,
    pub above: bool,
    pub below: bool,
}

impl ScrollWindow {
    pub fn fit(total: usize, rows: usize, offset: usize) -> Self {
        if total <= rows || rows < 3 {
            let start = offset.min(total.saturating_sub(rows));
            return Self {
                start,
                end: (start + rows).min(total),
                above: false,
                below: false,
            };
        }

        let start = offset.min(total - (rows - 1));
        let above = start > 0;
        let room = rows - usize::from(above);
        if start + room >= total {
            Self {
                start,
                end: total,
                above,
                below: false,
            }
        } else {
            Self {
                start,
                end: start + room - 1,
                above,
                below: true,
            }
        }
    }

    /// Lines hidden above the window.
    pub fn hidden_above(&self) -> usize {
        self.start
    }

    pub fn hidden_below(&self, total: usize) -> usize {
        total.saturating_sub(self.end)
    }
}
