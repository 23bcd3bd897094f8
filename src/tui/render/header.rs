use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::view::Screen;
use crate::tui::app::{App, HitTarget};
use crate::tui::wrap::display_width;

/// Render the header: name, menu tabs and the menu toggle, with a
/// separator line below.
pub fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let sep = "\u{2500}".repeat(area.width as usize);
    let line = Line::from(Span::styled(
        sep,
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ));
    frame.render_widget(Paragraph::new(line), chunks[1]);
}

/// Which tab is lit: the detail screen belongs to the portfolio.
fn current_tab(screen: Screen) -> Screen {
    match screen {
        Screen::ProjectDetail => Screen::Portfolio,
        s => s,
    }
}

fn render_tabs(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let current = current_tab(app.screen());
    let mut spans: Vec<Span> = Vec::new();
    let mut col: u16 = 0;

    let brand = format!(" \u{25C6} {} ", app.profile.name);
    col += display_width(&brand) as u16;
    spans.push(Span::styled(
        brand,
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));

    let sep_style = Style::default().fg(app.theme.dim).bg(bg);
    for (i, screen) in Screen::MENU.iter().enumerate() {
        spans.push(Span::styled("\u{2502}", sep_style));
        col += 1;

        let label = format!(" {} {} ", i + 1, screen.label());
        let width = display_width(&label) as u16;
        let style = if *screen == current {
            Style::default()
                .fg(app.theme.highlight)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        if col + width <= area.width {
            app.layout.hits.push((
                Rect::new(area.x + col, area.y, width, 1),
                HitTarget::Screen(*screen),
            ));
        }
        spans.push(Span::styled(label, style));
        col += width;
    }

    // Menu toggle, right-aligned
    let toggle = if app.session.state().menu_open {
        " \u{2715} m "
    } else {
        " \u{2261} m "
    };
    let toggle_w = display_width(toggle) as u16;
    if col + toggle_w < area.width {
        let pad = area.width - col - toggle_w;
        spans.push(Span::styled(" ".repeat(pad as usize), Style::default().bg(bg)));
        spans.push(Span::styled(
            toggle,
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    let tabs = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(tabs, area);
}
