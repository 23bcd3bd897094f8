use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::app::App;
use crate::tui::wrap::{display_width, pad_to_width, wrap_text};

use super::Document;

/// Push `text` wrapped to `width`, every row prefixed with `indent`.
fn push_wrapped(doc: &mut Document, text: &str, indent: &str, width: u16, style: Style) {
    let avail = (width as usize).saturating_sub(display_width(indent) + 1);
    for row in wrap_text(text, avail) {
        doc.push(Span::styled(format!("{}{}", indent, row), style));
    }
}

fn heading(app: &App, text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ))
}

/// About: summary, skills and work history.
pub fn build_about(app: &App, width: u16) -> Document {
    let mut doc = Document::default();
    let theme = &app.theme;
    let bg = theme.background;
    let profile = &app.profile;
    let bright = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.text).bg(bg);

    doc.blank();
    doc.push(heading(app, "ABOUT"));
    doc.push(Span::styled(
        format!(" {} \u{00B7} {}", profile.name, profile.headline),
        bright,
    ));
    doc.blank();
    push_wrapped(&mut doc, &profile.summary, " ", width, text);

    if !profile.skills.is_empty() {
        doc.blank();
        push_wrapped(
            &mut doc,
            &profile.skills_heading,
            " ",
            width,
            Style::default().fg(theme.highlight).bg(bg),
        );
        for skill in &profile.skills {
            doc.blank();
            doc.push(Span::styled(format!(" \u{25A0} {}", skill.title), bright));
            push_wrapped(&mut doc, &skill.text, "   ", width, text);
        }
    }

    if !profile.experience.is_empty() {
        doc.blank();
        doc.push(heading(app, "EXPERIENCE"));
        for job in &profile.experience {
            doc.blank();
            doc.push(Line::from(vec![
                Span::styled(format!(" {}", job.role), bright),
                Span::styled(
                    format!("  {}", job.period),
                    Style::default().fg(theme.dim).bg(bg),
                ),
            ]));
            push_wrapped(&mut doc, &job.company, " ", width, text);
            for item in &job.highlights {
                push_wrapped(&mut doc, &format!("\u{2013} {}", item), "   ", width, text);
            }
        }
    }
    doc
}

/// Contact details and footer.
pub fn build_contact(app: &App, width: u16) -> Document {
    let mut doc = Document::default();
    let theme = &app.theme;
    let bg = theme.background;
    let contact = &app.profile.contact;

    doc.blank();
    doc.push(heading(app, "CONTACT"));
    doc.push(Span::styled(
        " LET'S WORK TOGETHER",
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    doc.blank();

    let rows = [
        ("EMAIL", &contact.email),
        ("PHONE", &contact.phone),
        ("ROLE", &contact.desired_role),
        ("INDUSTRY", &contact.desired_industry),
    ];
    let value_w = (width as usize).saturating_sub(13);
    for (label, value) in rows {
        if value.is_empty() {
            continue;
        }
        doc.push(Line::from(vec![
            Span::styled(
                format!(" {}", pad_to_width(label, 11)),
                Style::default().fg(theme.dim).bg(bg),
            ),
            Span::styled(
                pad_to_width(value, value_w),
                Style::default().fg(theme.highlight).bg(bg),
            ),
        ]));
    }

    doc.blank();
    doc.push(Span::styled(
        format!(" {}", app.profile.footer),
        Style::default().fg(theme.dim).bg(bg),
    ));
    doc
}
