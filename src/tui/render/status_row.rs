use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::NoticeLevel;
use crate::model::view::Screen;
use crate::tui::app::{App, Mode, PromptKind};
use crate::tui::wrap::{display_width, truncate_to_width};

pub fn prompt_label(kind: PromptKind) -> String {
    match kind {
        PromptKind::Field(field) => field.to_string(),
        PromptKind::AppendImage => "add image (file or URL)".to_string(),
        PromptKind::ReplaceImage(i) => format!("replace image {} (file or URL)", i + 1),
        PromptKind::Cover => "cover image (file or URL)".to_string(),
        PromptKind::Export => "export to".to_string(),
    }
}

fn screen_hint(screen: Screen, admin: bool) -> &'static str {
    match (screen, admin) {
        (Screen::Portfolio, _) => "j/k move  Enter open  f filter  m menu  q quit",
        (Screen::ProjectDetail, true) => "j/k scroll  [/] image  n next  e edit  i add  d delete  Esc back",
        (Screen::ProjectDetail, false) => "j/k scroll  [/] image  n next  Esc back",
        (_, true) => "1-4 screens  m menu  x export  q quit",
        (_, false) => "1-4 screens  m menu  q quit",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    let hint: String;

    if let (Mode::Prompt, Some(prompt)) = (app.mode, &app.prompt) {
        spans.push(Span::styled(
            format!(" {}: ", prompt_label(prompt.kind)),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        spans.push(Span::styled(
            prompt.buffer.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        spans.push(Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)));
        hint = if matches!(prompt.kind, PromptKind::Field(_)) {
            "Tab field  Enter apply  Esc cancel".to_string()
        } else {
            "Enter apply  Esc cancel".to_string()
        };
    } else {
        match &app.session.state().notice {
            Some(notice) => {
                let color = match notice.level {
                    NoticeLevel::Info => app.theme.green,
                    NoticeLevel::Error => app.theme.red,
                };
                spans.push(Span::styled(
                    format!(" {}", notice.text),
                    Style::default().fg(color).bg(bg),
                ));
            }
            None => spans.push(Span::styled(
                format!(" {}", screen_hint(app.screen(), app.is_admin())),
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        }
        let mut right = Vec::new();
        if app.session.pending_saves() > 0 {
            right.push("saving\u{2026}");
        }
        if app.back_to_top_visible() {
            right.push("g \u{2191} top");
        }
        hint = right.join("  ");
    }

    // Right-aligned hint, dropped when it does not fit
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(&hint);
    if !hint.is_empty() && content_width + hint_width + 1 < width {
        let padding = width - content_width - hint_width - 1;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            format!("{} ", hint),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else if content_width > width {
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        spans = vec![Span::styled(
            truncate_to_width(&text, width),
            Style::default().fg(app.theme.text).bg(bg),
        )];
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
