//! Clicker widget rendering: counter header, click button, shop tabs, log.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, HitMap};
use crate::widgets::{ScrollWindow, TapList, TabBar};

use super::actions;
use super::calc;
use super::catalog::{BuildingDef, BUILDINGS};
use super::format::{format_compact, format_count, format_rate};
use super::milestone;
use super::state::ProgressionState;
use super::{listed_upgrades, EventLog, View};

/// Everything a frame needs, borrowed from the game for the draw call.
pub struct Screen<'a> {
    pub state: &'a ProgressionState,
    pub view: View,
    pub reset_armed: bool,
    pub clicks_per_second: f64,
    /// Set while the "+N" popup is visible.
    pub recent_gain: Option<f64>,
    /// Requested first upgrade row; written back clamped to what fits.
    pub upgrade_scroll: &'a Cell<usize>,
    pub log: &'a EventLog,
}

pub fn render(screen: &Screen, f: &mut Frame, area: Rect, hit_map: &Rc<RefCell<HitMap>>) {
    // Log panel on the right when wide enough
    let (main_area, log_area) = if area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // counter header
            Constraint::Length(3), // click button
            Constraint::Length(3), // tab bar
            Constraint::Min(4),    // shop list
            Constraint::Length(1), // footer
        ])
        .split(main_area);

    render_header(screen, f, chunks[0]);
    render_click_button(screen, f, chunks[1], hit_map);
    render_tab_bar(screen, f, chunks[2], hit_map);
    match screen.view {
        View::Buildings => render_buildings(screen, f, chunks[3], hit_map),
        View::Upgrades => render_upgrades(screen, f, chunks[3], hit_map),
    }
    render_footer(screen, f, chunks[4], hit_map);

    if let Some(log_area) = log_area {
        render_log(screen.log, f, log_area);
    }
}

fn borders_for(width: u16) -> Borders {
    if is_narrow_layout(width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

fn render_header(screen: &Screen, f: &mut Frame, area: Rect) {
    let state = screen.state;
    let count = state.displayed_count();
    let gain = calc::manual_gain(state);

    let next_line = match milestone::next(count) {
        Some((threshold, title)) => Line::from(Span::styled(
            format!(" Next: {title} at {}", format_count(threshold as f64)),
            Style::default().fg(Color::DarkGray),
        )),
        None => Line::from(Span::styled(
            " Every title earned",
            Style::default().fg(Color::Magenta),
        )),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", format_count(state.resource_count)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("clicks  ", Style::default().fg(Color::White)),
            Span::styled(
                milestone::title(count),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" {}/s", format_rate(state.total_yield_per_second())),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!("  +{}/click", format_rate(gain)),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("  {} clicks/s", format_rate(screen.clicks_per_second)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        next_line,
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(borders_for(area.width))
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Clicker "),
    );
    f.render_widget(widget, area);
}

fn render_click_button(
    screen: &Screen,
    f: &mut Frame,
    area: Rect,
    hit_map: &Rc<RefCell<HitMap>>,
) {
    let (label, style) = match screen.recent_gain {
        Some(amount) => (
            format!("+{}!", format_rate(amount)),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            "[C] Click!".to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let widget = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(widget, area);

    hit_map
        .borrow_mut()
        .add_region(area, actions::CLICK);
}

fn render_tab_bar(
    screen: &Screen,
    f: &mut Frame,
    area: Rect,
    hit_map: &Rc<RefCell<HitMap>>,
) {
    let tab_style = |view: View, color: Color| -> Style {
        if screen.view == view {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    };

    let available = listed_upgrades(screen.state)
        .iter()
        .filter(|u| calc::can_afford_upgrade(screen.state, u))
        .count();
    let upgrades_label = if available > 0 {
        format!("[U] Upgrades ({available})")
    } else {
        "[U] Upgrades".to_string()
    };

    let mut hits = hit_map.borrow_mut();
    TabBar::new(" │ ")
        .tab(
            "[B] Buildings",
            tab_style(View::Buildings, Color::Green),
            actions::TAB_BUILDINGS,
        )
        .tab(
            upgrades_label,
            tab_style(View::Upgrades, Color::Magenta),
            actions::TAB_UPGRADES,
        )
        .block(
            Block::default()
                .borders(borders_for(area.width))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(f, area, &mut hits);
}

/// Building whose next unit pays for itself soonest.
fn best_payback(state: &ProgressionState) -> Option<&'static str> {
    BUILDINGS
        .iter()
        .filter_map(|b| calc::payback_seconds(state, b).map(|s| (b.id, s)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

fn building_label(state: &ProgressionState, def: &BuildingDef, narrow: bool) -> String {
    let owned = state.owned(def.id);
    let cost = format_compact(calc::next_building_cost(state, def));
    let each = format_rate(def.base_yield * calc::tier_multiplier(state, def.id));
    if narrow {
        format!("[{}] {} x{owned}  {cost}", def.key, def.name)
    } else {
        format!(
            "[{}] {:<11} x{owned:<4} cost {cost:<7} +{each}/s each",
            def.key, def.name
        )
    }
}

fn render_buildings(
    screen: &Screen,
    f: &mut Frame,
    area: Rect,
    hit_map: &Rc<RefCell<HitMap>>,
) {
    let state = screen.state;
    let narrow = is_narrow_layout(area.width);
    let best = best_payback(state);

    let mut list = TapList::new();
    for (i, def) in BUILDINGS.iter().enumerate() {
        let affordable = calc::can_afford_building(state, def);
        let style = match (affordable, best == Some(def.id)) {
            (true, true) => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::White),
            (false, _) => Style::default().fg(Color::DarkGray),
        };
        let line = Line::from(Span::styled(building_label(state, def, narrow), style));
        list.push_clickable(line, actions::BUY_BUILDING_BASE + i as u16);
    }
    if !narrow {
        if let Some(def) = best.and_then(super::catalog::building) {
            list.push(Line::from(Span::styled(
                format!(" Best value: {}", def.name),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::Green))
        .title(" Buildings ");
    list.render(f, area, block, &mut hit_map.borrow_mut());
}

fn render_upgrades(
    screen: &Screen,
    f: &mut Frame,
    area: Rect,
    hit_map: &Rc<RefCell<HitMap>>,
) {
    let state = screen.state;
    let narrow = is_narrow_layout(area.width);
    let listed = listed_upgrades(state);

    let mut items = TapList::new();
    if listed.is_empty() {
        items.push(Line::from(Span::styled(
            " All upgrades purchased",
            Style::default().fg(Color::Magenta),
        )));
    }
    for (i, def) in listed.iter().enumerate() {
        let Some(key) = actions::upgrade_key(i) else {
            break;
        };
        let line = if calc::is_upgrade_available(state, def) {
            let style = if calc::can_afford_upgrade(state, def) {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let text = if narrow {
                format!("[{key}] {} {}", def.name, format_compact(def.cost))
            } else {
                format!(
                    "[{key}] {:<20} {:<7} {}",
                    def.name,
                    format_compact(def.cost),
                    def.description
                )
            };
            Line::from(Span::styled(text, style))
        } else {
            Line::from(Span::styled(
                format!("[{key}] ??? ({})", def.unlock.hint()),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            ))
        };
        items.push_clickable(line, actions::BUY_UPGRADE_BASE + i as u16);
    }

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Upgrades ");
    let rows = block.inner(area).height as usize;
    let list = scrolled(items, rows, screen.upgrade_scroll);
    list.render(f, area, block, &mut hit_map.borrow_mut());
}

/// The part of `items` that fits in `rows`, with tappable markers for the
/// hidden rest. Stores the clamped offset back into `offset`.
fn scrolled<'a>(items: TapList<'a>, rows: usize, offset: &Cell<usize>) -> TapList<'a> {
    let total = items.len();
    let window = ScrollWindow::fit(total, rows, offset.get());
    offset.set(window.start);

    let marker = Style::default().fg(Color::DarkGray);
    let mut list = TapList::new();
    if window.above {
        list.push_clickable(
            Line::from(Span::styled(
                format!(
                    "[{}] ▲ {} more",
                    actions::KEY_SCROLL_UP.to_ascii_uppercase(),
                    window.hidden_above()
                ),
                marker,
            )),
            actions::SCROLL_UP,
        );
    }
    let below = window.hidden_below(total);
    list.append_range(items, window.start..window.end);
    if window.below {
        list.push_clickable(
            Line::from(Span::styled(
                format!("[{}] ▼ {below} more", actions::KEY_SCROLL_DOWN.to_ascii_uppercase()),
                marker,
            )),
            actions::SCROLL_DOWN,
        );
    }
    list
}

fn render_footer(
    screen: &Screen,
    f: &mut Frame,
    area: Rect,
    hit_map: &Rc<RefCell<HitMap>>,
) {
    let reset = if screen.reset_armed {
        Span::styled(
            " [R] Press again to wipe progress ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" [R] Reset ", Style::default().fg(Color::Red))
    };
    let reset_width = reset.width() as u16;

    f.render_widget(Paragraph::new(Line::from(reset)), area);

    let target = Rect::new(area.x, area.y, reset_width.min(area.width), area.height);
    hit_map
        .borrow_mut()
        .add_region(target, actions::RESET);
}

fn render_log(log: &EventLog, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = log
        .entries()
        .take(visible)
        .enumerate()
        .map(|(i, entry)| {
            let style = if entry.starts_with('★') {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if i < 3 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!(" > {entry}"), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
