use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::view::Screen;
use crate::tui::app::{App, HitTarget};

use super::confirm_popup::centered_rect_fixed;

/// Render the full-screen menu: one entry per top-level screen.
/// Entries are clickable and take precedence over anything underneath.
pub fn render_menu_overlay(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.menu_bg;
    let popup_w: u16 = 30.min(area.width);
    let popup_h: u16 = (Screen::MENU.len() as u16 + 5).min(area.height);
    let rect = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, rect);

    let current = app.screen();
    let mut lines = vec![
        Line::from(Span::styled(
            " MENU",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
        Line::from(""),
    ];
    for (i, screen) in Screen::MENU.iter().enumerate() {
        let style = if *screen == current {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text_bright).bg(bg)
        };
        lines.push(Line::from(Span::styled(
            format!("  {}  {}", i + 1, screen.label()),
            style,
        )));

        let row = rect.y + 3 + i as u16;
        if row < rect.y + rect.height.saturating_sub(1) {
            let hit = Rect::new(rect.x + 1, row, rect.width.saturating_sub(2), 1);
            app.layout.hits.insert(0, (hit, HitTarget::Screen(*screen)));
        }
    }
    lines.push(Line::from(Span::styled(
        " Esc close",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        rect,
    );
}
