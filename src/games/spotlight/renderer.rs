use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::view::{MarkerClass, MarkerView, RosterClass, View};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const ROSTER_WIDTH: u16 = 26;

const ARENA_BG: Color = Color::Rgb(18, 18, 28);
const SPOTLIGHT_BG: Color = Color::Rgb(140, 120, 30);

struct Panels {
    header: Rect,
    arena: Rect,
    roster: Rect,
    footer: Rect,
}

fn panels(area: Rect) -> Panels {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(ROSTER_WIDTH)])
        .split(rows[1]);

    Panels { header: rows[0], arena: body[0], roster: body[1], footer: rows[2] }
}

fn arena_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(" Arena ")
}

/// Cells available to the game display for a terminal of the given size.
pub fn arena_area(area: Rect) -> Rect {
    arena_block().inner(panels(area).arena)
}

/// Draw a whole frame from its view description.
pub fn draw(frame: &mut Frame, view: &View) {
    let panels = panels(frame.area());

    render_header(frame, panels.header, view);
    render_roster(frame, panels.roster, view);
    render_footer(frame, panels.footer, view);

    let block = arena_block();
    let inner = block.inner(panels.arena);
    frame.render_widget(block, panels.arena);
    frame.render_widget(ArenaWidget { view }, inner);

    if let Some(banner) = view.banner {
        render_banner(frame, inner, banner);
    }
}

fn render_header(frame: &mut Frame, area: Rect, view: &View) {
    let line = Line::from(vec![
        Span::styled(view.status, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("   Time: "),
        Span::styled(view.time_remaining.clone(), Style::default().fg(Color::Cyan)),
        Span::raw("   Players: "),
        Span::styled(view.player_count.clone(), Style::default().fg(Color::Cyan)),
    ]);
    let header =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" 🔦 Spotlight "));
    frame.render_widget(header, area);
}

fn render_roster(frame: &mut Frame, area: Rect, view: &View) {
    let items: Vec<ListItem> = view
        .roster
        .iter()
        .map(|row| {
            let style = match row.class {
                RosterClass::Active => Style::default().fg(Color::Green),
                RosterClass::Eliminated => {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                }
            };
            ListItem::new(row.text.clone()).style(style)
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Players "));
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect, view: &View) {
    let hint = "Drag in the arena to move · q to quit";
    let mut spans = vec![Span::styled(hint, Style::default().fg(Color::Gray))];
    if view.show_start {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "[s] Start game",
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }
    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_banner(frame: &mut Frame, arena: Rect, banner: &str) {
    let width = (banner.chars().count() as u16 + 4).min(arena.width);
    let height = 3.min(arena.height);
    let rect = Rect::new(
        arena.x + (arena.width - width) / 2,
        arena.y + (arena.height - height) / 2,
        width,
        height,
    );
    let paragraph = Paragraph::new(banner)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
    frame.render_widget(Clear, rect);
    frame.render_widget(paragraph, rect);
}

/// Container, spotlight and avatars, placed by the view's viewport
struct ArenaWidget<'a> {
    view: &'a View,
}

impl Widget for ArenaWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let vp = self.view.viewport;
        if vp.is_empty() {
            return;
        }
        let container = Rect::new(
            vp.left.floor().max(0.0) as u16,
            vp.top.floor().max(0.0) as u16,
            vp.width.round().max(1.0) as u16,
            vp.height.round().max(1.0) as u16,
        )
        .intersection(area);

        let light = self.view.spotlight;
        for y in container.top()..container.bottom() {
            for x in container.left()..container.right() {
                let dx = (x as f64 + 0.5 - vp.left - light.x) / light.radius_x.max(f64::EPSILON);
                let dy = (y as f64 + 0.5 - vp.top - light.y) / light.radius_y.max(f64::EPSILON);
                let bg = if dx * dx + dy * dy <= 1.0 { SPOTLIGHT_BG } else { ARENA_BG };
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(" ").set_style(Style::default().bg(bg));
                }
            }
        }

        for marker in &self.view.markers {
            let x = marker_cell(vp.left + marker.x, container.left(), container.right());
            let y = marker_cell(vp.top + marker.y, container.top(), container.bottom());
            if let Some(cell) = buf.cell_mut((x, y)) {
                let (symbol, style) = marker_look(marker);
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}

// Cell holding a screen coordinate, kept inside [start, end).
fn marker_cell(pos: f64, start: u16, end: u16) -> u16 {
    let last = end.saturating_sub(1).max(start);
    (pos.floor().max(0.0) as u16).clamp(start, last)
}

fn marker_look(marker: &MarkerView) -> (&'static str, Style) {
    let (symbol, fg) = match marker.class {
        MarkerClass::Normal => ("●", Color::Green),
        MarkerClass::Spotted => ("◉", Color::Red),
        MarkerClass::Eliminated => ("✕", Color::DarkGray),
    };
    if marker.is_self {
        ("Y", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    } else {
        (symbol, Style::default().fg(fg))
    }
}
