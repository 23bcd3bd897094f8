use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::tui::app::App;
use crate::tui::wrap::wrap_text;

use super::Document;
use super::portfolio_view::push_card;

/// Projects featured on the home screen.
const FEATURED: usize = 3;

pub fn build(app: &App, width: u16) -> Document {
    let mut doc = Document::default();
    let theme = &app.theme;
    let bg = theme.background;
    let profile = &app.profile;
    let text_w = (width as usize).saturating_sub(2);

    doc.blank();
    doc.push(Span::styled(
        format!(" {}", profile.name),
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    doc.push(Span::styled(
        format!(" {}", profile.greeting),
        Style::default().fg(theme.highlight).bg(bg),
    ));
    doc.push(Span::styled(
        format!(" {}", profile.headline.to_uppercase()),
        Style::default().fg(theme.text).bg(bg),
    ));
    doc.blank();
    for row in wrap_text(&profile.summary, text_w) {
        doc.push(Span::styled(
            format!(" {}", row),
            Style::default().fg(theme.text).bg(bg),
        ));
    }
    doc.blank();

    doc.push(Span::styled(
        " SELECTED WORK",
        Style::default().fg(theme.dim).bg(bg),
    ));
    for (i, project) in app.session.projects().iter().take(FEATURED).enumerate() {
        push_card(&mut doc, app, project, i + 1, width, false);
    }
    doc.blank();
    doc.push(Span::styled(
        " 2 portfolio \u{00B7} 3 about \u{00B7} 4 contact \u{00B7} Enter browse all",
        Style::default().fg(theme.dim).bg(bg),
    ));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{render_app, test_app};

    #[test]
    fn home_shows_profile_and_featured_work() {
        let mut app = test_app();
        let out = render_app(&mut app);
        assert!(out.contains("KUMO"));
        assert!(out.contains("PRODUCT DESIGNER"));
        assert!(out.contains("SELECTED WORK"));
    }

    #[test]
    fn home_features_first_projects() {
        let app = test_app();
        let doc = build(&app, 70);
        assert_eq!(doc.cards.len(), FEATURED);
        assert_eq!(doc.cards[0].2, app.session.projects()[0].id);
    }
}
