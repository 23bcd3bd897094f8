use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::wrap::wrap_text;

/// Render the yes/no popup for the operation waiting on confirmation.
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(pending) = &app.session.state().pending_confirm else {
        return;
    };
    let popup_w: u16 = 44.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4) as usize;

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let hint_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Confirm", header_style)),
        Line::from(""),
    ];
    for row in wrap_text(&pending.prompt, inner_w) {
        lines.push(Line::from(Span::styled(format!(" {}", row), text_style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" y confirm   n cancel", hint_style)));

    // Dynamic height from content + 2 for borders
    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
