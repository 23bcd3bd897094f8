use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::project::Project;
use crate::tui::app::App;
use crate::tui::wrap::{display_width, pad_to_width};

use super::Document;

/// Rows per project card, including borders.
pub const CARD_ROWS: u16 = 4;

/// Build the portfolio screen: filter bar, then one card per project.
pub fn build(app: &App, width: u16) -> Document {
    let mut doc = Document::default();
    let theme = &app.theme;
    let bg = theme.background;
    let filter = app.session.state().filter;
    let projects = app.session.visible_projects();

    doc.blank();
    let title = " PORTFOLIO";
    let filter_label = format!("filter: {}  (f) ", filter);
    let gap = (width as usize).saturating_sub(display_width(title) + display_width(&filter_label));
    doc.push(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ".repeat(gap), Style::default().bg(bg)),
        Span::styled(filter_label, Style::default().fg(theme.dim).bg(bg)),
    ]));
    doc.push(Span::styled(
        format!(" {} projects", projects.len()),
        Style::default().fg(theme.dim).bg(bg),
    ));
    doc.blank();

    if projects.is_empty() {
        doc.push(Span::styled(
            " Nothing in this category. Press f to change the filter.",
            Style::default().fg(theme.dim).bg(bg),
        ));
        return doc;
    }

    let selected = app.portfolio_cursor.min(projects.len() - 1);
    for (i, project) in projects.iter().enumerate() {
        push_card(&mut doc, app, project, i + 1, width, i == selected);
        doc.blank();
    }
    doc
}

/// Append a bordered project card and record its rows.
pub(super) fn push_card(
    doc: &mut Document,
    app: &App,
    project: &Project,
    number: usize,
    width: u16,
    selected: bool,
) {
    let theme = &app.theme;
    let w = width as usize;
    let inner = w.saturating_sub(5);
    let bg = if selected { theme.selection_bg } else { theme.background };
    let border = Style::default()
        .fg(if selected { theme.highlight } else { theme.dim })
        .bg(theme.background);
    let fill = Style::default().bg(bg);

    let top = doc.row();
    doc.push(Span::styled(
        format!(" \u{250C}{}\u{2510}", "\u{2500}".repeat(w.saturating_sub(3))),
        border,
    ));

    // Title left, category and year right
    let right = format!("{} \u{00B7} {}", project.category, project.year);
    let right_w = display_width(&right);
    let left_w = inner.saturating_sub(right_w + 1);
    let left = pad_to_width(&format!("{:02}  {}", number, project.title), left_w);
    let mut title_line = vec![
        Span::styled(" \u{2502} ", border),
        Span::styled(
            left,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if inner > right_w {
        title_line.push(Span::styled(" ", fill));
        title_line.push(Span::styled(
            right,
            Style::default().fg(theme.category_color(project.category)).bg(bg),
        ));
    }
    title_line.push(Span::styled(" \u{2502}", border));
    doc.push(Line::from(title_line));

    doc.push(Line::from(vec![
        Span::styled(" \u{2502} ", border),
        Span::styled(
            pad_to_width(&format!("    {}", project.subtitle), inner),
            Style::default().fg(theme.text).bg(bg),
        ),
        Span::styled(" \u{2502}", border),
    ]));
    doc.push(Span::styled(
        format!(" \u{2514}{}\u{2518}", "\u{2500}".repeat(w.saturating_sub(3))),
        border,
    ));

    doc.cards.push((top, CARD_ROWS, project.id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Action;
    use crate::model::project::Category;
    use crate::model::view::Screen;
    use crate::ops::filter::CategoryFilter;
    use crate::tui::render::test_helpers::{render_app, test_app};

    #[test]
    fn cards_are_recorded_in_order() {
        let app = test_app();
        let doc = build(&app, 60);
        let ids: Vec<&str> = doc.cards.iter().map(|(_, _, id)| id.as_str()).collect();
        assert_eq!(ids[0], "clackyai-ui");
        assert_eq!(ids.len(), app.session.projects().len());
        // Header takes four rows, each card four plus a blank
        assert_eq!(doc.cards[0].0, 4);
        assert_eq!(doc.cards[1].0, 9);
    }

    #[test]
    fn card_lines_fill_width() {
        let app = test_app();
        let doc = build(&app, 60);
        let top = doc.cards[0].0 as usize;
        for line in &doc.lines[top..top + CARD_ROWS as usize] {
            assert_eq!(line.width(), 60);
        }
    }

    #[test]
    fn filter_limits_cards() {
        let mut app = test_app();
        app.session
            .dispatch(Action::SetFilter(CategoryFilter::Only(Category::Illustration)));
        let doc = build(&app, 60);
        assert_eq!(doc.cards.len(), 1);
        assert_eq!(doc.cards[0].2, "illustration-series");
    }

    #[test]
    fn portfolio_screen_renders() {
        let mut app = test_app();
        app.go(Screen::Portfolio, None);
        let out = render_app(&mut app);
        assert!(out.contains("PORTFOLIO"));
        assert!(out.contains("filter: ALL"));
        assert!(out.contains("01  "));
        assert!(app.layout.project_rects().len() >= 2);
    }
}
