pub mod confirm_popup;
pub mod detail_view;
pub mod header;
pub mod home_view;
pub mod menu_overlay;
pub mod portfolio_view;
pub mod profile_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::model::view::Screen;
use crate::ops::rail::ImageSpan;

use super::app::{App, HitTarget};
use super::cursor::{DEFAULT_INACTIVE_ZONE, glow_for};

/// A screen's scrollable content, laid out for one width.
#[derive(Debug, Default)]
pub struct Document {
    pub lines: Vec<Line<'static>>,
    pub image_spans: Vec<ImageSpan>,
    /// Project cards: (top row, height, project id)
    pub cards: Vec<(u16, u16, String)>,
}

impl Document {
    /// Row the next pushed line lands on.
    pub fn row(&self) -> u16 {
        self.lines.len() as u16
    }

    pub fn push(&mut self, line: impl Into<Line<'static>>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(Line::default());
    }
}

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    app.layout.hits.clear();
    header::render_header(frame, app, chunks[0]);

    let content = chunks[1];
    let screen = app.screen();
    let rail_w = if screen == Screen::ProjectDetail {
        detail_view::RAIL_WIDTH.min(content.width / 4)
    } else {
        0
    };
    let doc_area = Rect {
        width: content.width - rail_w,
        ..content
    };

    let doc = match screen {
        Screen::Home => home_view::build(app, doc_area.width),
        Screen::Portfolio => portfolio_view::build(app, doc_area.width),
        Screen::About => profile_view::build_about(app, doc_area.width),
        Screen::Contact => profile_view::build_contact(app, doc_area.width),
        Screen::ProjectDetail => detail_view::build(app, doc_area.width),
    };

    app.layout.content = content;
    app.layout.content_rows = doc.row();
    app.layout.card_rows = doc.cards.iter().map(|(top, h, _)| (*top, *h)).collect();
    if app.layout.image_spans != doc.image_spans {
        app.layout.image_spans = doc.image_spans.clone();
        app.throttle.request();
    }

    let scroll = app.scroll_y();
    record_card_hits(app, &doc, doc_area, scroll);

    let paragraph = Paragraph::new(doc.lines)
        .scroll((scroll, 0))
        .style(bg_style);
    frame.render_widget(paragraph, doc_area);

    if rail_w > 0 && app.rail.is_visible() {
        let rail_area = Rect {
            x: doc_area.x + doc_area.width,
            width: rail_w,
            ..content
        };
        detail_view::render_rail(frame, app, rail_area);
    }

    render_glow(frame, app);

    if app.session.state().menu_open {
        menu_overlay::render_menu_overlay(frame, app, area);
    }
    if app.session.state().pending_confirm.is_some() {
        confirm_popup::render_confirm_popup(frame, app, area);
    }

    render_cursor(frame, app, area);
    status_row::render_status_row(frame, app, chunks[2]);
}

/// Map card rows to their visible screen rects.
fn record_card_hits(app: &mut App, doc: &Document, area: Rect, scroll: u16) {
    let view_end = scroll.saturating_add(area.height);
    for (top, height, id) in &doc.cards {
        let start = (*top).max(scroll);
        let end = top.saturating_add(*height).min(view_end);
        if start >= end {
            continue;
        }
        let rect = Rect::new(area.x, area.y + (start - scroll), area.width, end - start);
        app.layout
            .hits
            .push((rect, HitTarget::Project(id.clone())));
    }
}

fn render_glow(frame: &mut Frame, app: &App) {
    if !app.cursor.seen || app.session.state().menu_open {
        return;
    }
    let pointer = app.cursor.position();
    for rect in app.layout.project_rects() {
        if let Some(glow) = glow_for(rect, pointer, DEFAULT_INACTIVE_ZONE)
            && let Some(cell) = frame.buffer_mut().cell_mut(glow.anchor)
        {
            cell.set_symbol(glow.arrow());
            cell.set_fg(app.theme.glow);
        }
    }
}

fn render_cursor(frame: &mut Frame, app: &App, area: Rect) {
    if !app.cursor.seen {
        return;
    }
    let pos: Position = app.cursor.position();
    if !area.contains(pos) {
        return;
    }
    // The small dot only draws over empty cells so it never hides text
    if let Some(cell) = frame.buffer_mut().cell_mut(pos)
        && (app.cursor.hovering || cell.symbol() == " ")
    {
        cell.set_symbol(app.cursor.glyph());
        cell.set_fg(app.theme.glow);
    }
}
