use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::image::{LocalProbe, is_inline, resolve_with_fallback};
use crate::model::project::Project;
use crate::ops::filter::next_project;
use crate::ops::rail::stack_spans;
use crate::tui::app::App;
use crate::tui::wrap::{display_width, pad_to_width, truncate_to_width, wrap_text};

use super::Document;

/// Rows per image block, including borders.
pub const IMAGE_ROWS: u16 = 7;
/// Blank rows between image blocks.
pub const IMAGE_GAP: u16 = 1;
/// Columns reserved on the right for the image index rail.
pub const RAIL_WIDTH: u16 = 8;

/// Build the detail screen for the selected project.
pub fn build(app: &App, width: u16) -> Document {
    let mut doc = Document::default();
    let Some(project) = app.session.selected_project() else {
        let dim = Style::default().fg(app.theme.dim).bg(app.theme.background);
        doc.blank();
        doc.push(Span::styled(" This project no longer exists.", dim));
        doc.push(Span::styled(" Esc returns to the portfolio.", dim));
        return doc;
    };

    push_intro(&mut doc, app, project, width);

    doc.push(label_line(app, "COVER"));
    push_image_block(&mut doc, app, "COVER", &project.cover_image, width, false);
    doc.blank();

    let count = project.detail_images.len();
    doc.push(label_line(app, &format!("DETAILS \u{00B7} {} IMAGES", count)));
    if count == 0 {
        doc.push(Span::styled(
            " No detail images yet. Press i to add one.",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ));
    } else {
        let heights = vec![IMAGE_ROWS; count];
        doc.image_spans = stack_spans(doc.row(), &heights, IMAGE_GAP);
        for (i, image) in project.detail_images.iter().enumerate() {
            let label = format!("{:02}/{:02}", i + 1, count);
            let active = app.rail.active == Some(i);
            push_image_block(&mut doc, app, &label, image, width, active);
            for _ in 0..IMAGE_GAP {
                doc.blank();
            }
        }
    }

    doc.blank();
    if let Some(next) = next_project(app.session.projects(), &project.id)
        && next.id != project.id
    {
        doc.push(Line::from(vec![
            Span::styled(
                " NEXT PROJECT  \u{2192}  ",
                Style::default().fg(app.theme.dim).bg(app.theme.background),
            ),
            Span::styled(
                next.title.clone(),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(app.theme.background)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  (n)",
                Style::default().fg(app.theme.dim).bg(app.theme.background),
            ),
        ]));
    }
    doc.push(Span::styled(
        format!(" {}", app.profile.footer),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ));
    doc
}

fn label_line(app: &App, text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ))
}

fn push_intro(doc: &mut Document, app: &App, project: &Project, width: u16) {
    let theme = &app.theme;
    let bg = theme.background;
    let text = Style::default().fg(theme.text).bg(bg);
    let dim = Style::default().fg(theme.dim).bg(bg);

    doc.blank();
    doc.push(Span::styled(
        format!(" {} \u{00B7} {}", project.category, project.year),
        Style::default().fg(theme.category_color(project.category)).bg(bg),
    ));
    doc.push(Span::styled(
        format!(" {}", project.title),
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    doc.push(Span::styled(format!(" {}", project.subtitle), text));
    doc.blank();
    let tags: Vec<String> = project.tags.iter().map(|t| format!("#{}", t)).collect();
    let tag_style = Style::default().fg(theme.highlight).bg(bg);
    push_labeled(doc, " ROLE  ", &project.role, dim, text, width);
    push_labeled(doc, " TAGS  ", &tags.join("  "), dim, tag_style, width);
    doc.blank();
    for row in wrap_text(&project.description, (width as usize).saturating_sub(3)) {
        doc.push(Span::styled(format!(" {}", row), text));
    }
    doc.blank();
}

/// A label followed by `value` wrapped under a hanging indent.
fn push_labeled(doc: &mut Document, label: &str, value: &str, label_style: Style, style: Style, width: u16) {
    let indent = display_width(label);
    let rows = wrap_text(value, (width as usize).saturating_sub(indent + 1).max(1));
    for (i, row) in rows.into_iter().enumerate() {
        let head = if i == 0 {
            label.to_string()
        } else {
            " ".repeat(indent)
        };
        doc.push(Line::from(vec![
            Span::styled(head, label_style),
            Span::styled(row, style),
        ]));
    }
}

/// Describe where an image reference points, for the block's last line.
fn image_source(app: &App, reference: &str) -> (String, String) {
    if is_inline(reference) {
        let payload = reference.split_once(',').map_or(0, |(_, p)| p.len());
        let kb = payload as f64 * 0.75 / 1024.0;
        return (
            "inline image".to_string(),
            format!("uploaded \u{00B7} {:.1} KB", kb),
        );
    }
    let resolved = resolve_with_fallback(reference, &app.session.config().images, &LocalProbe);
    let status = if !resolved.available {
        "unavailable".to_string()
    } else if resolved.retries > 0 {
        format!("loaded after {} retries", resolved.retries)
    } else {
        String::new()
    };
    (resolved.url, status)
}

fn push_image_block(doc: &mut Document, app: &App, label: &str, reference: &str, width: u16, active: bool) {
    let theme = &app.theme;
    let w = width as usize;
    let inner = w.saturating_sub(5);
    let border = Style::default()
        .fg(if active { theme.highlight } else { theme.dim })
        .bg(theme.background);
    let body = Style::default().fg(theme.text).bg(theme.background);

    let head = format!(" \u{250C}\u{2500} {} ", label);
    let rule = w.saturating_sub(display_width(&head) + 1);
    doc.push(Span::styled(
        format!("{}{}\u{2510}", head, "\u{2500}".repeat(rule)),
        border,
    ));

    let (url, status) = image_source(app, reference);
    let rows = [
        String::new(),
        format!("\u{25A3} {}", if active { "VIEWING" } else { "IMAGE" }),
        truncate_to_width(&url, inner),
        status,
        String::new(),
    ];
    for row in rows {
        doc.push(Line::from(vec![
            Span::styled(" \u{2502} ", border),
            Span::styled(pad_to_width(&row, inner), body),
            Span::styled(" \u{2502}", border),
        ]));
    }
    doc.push(Span::styled(
        format!(" \u{2514}{}\u{2518}", "\u{2500}".repeat(w.saturating_sub(3))),
        border,
    ));
}

/// Render the image index rail: one entry per detail image, the active one
/// marked. Long lists are windowed around the active entry.
pub fn render_rail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(project) = app.session.selected_project() else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let count = project.detail_images.len();
    let rows = area.height.saturating_sub(1) as usize;
    let active = app.rail.active.unwrap_or(0);
    let start = active
        .saturating_sub(rows / 2)
        .min(count.saturating_sub(rows));

    let mut lines = vec![Line::from(Span::styled(
        " [ ] ",
        Style::default().fg(theme.dim).bg(bg),
    ))];
    for i in start..count.min(start + rows) {
        let is_active = app.rail.active == Some(i);
        let (marker, style) = if is_active {
            (
                "\u{25B6}",
                Style::default()
                    .fg(theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (" ", Style::default().fg(theme.dim).bg(bg))
        };
        lines.push(Line::from(Span::styled(
            format!(" {} {:02}", marker, i + 1),
            style,
        )));
    }
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::view::Screen;
    use crate::tui::render::test_helpers::{TERM_W, render_app, render_to_string, test_app};

    fn detail_app(id: &str) -> App {
        let mut app = test_app();
        app.go(Screen::Portfolio, Some(id));
        app
    }

    #[test]
    fn spans_match_rendered_blocks() {
        let app = detail_app("clackyai-ui");
        let doc = build(&app, 70);
        let count = app.session.selected_project().unwrap().detail_images.len();
        assert_eq!(doc.image_spans.len(), count);
        for (i, span) in doc.image_spans.iter().enumerate() {
            let top = doc.lines[span.top as usize].to_string();
            assert!(top.contains(&format!("{:02}/{:02}", i + 1, count)), "{}", top);
            assert_eq!(span.height, IMAGE_ROWS);
        }
        assert_eq!(
            doc.image_spans[1].top - doc.image_spans[0].top,
            IMAGE_ROWS + IMAGE_GAP
        );
    }

    #[test]
    fn remote_urls_are_resolved() {
        let app = detail_app("methodology");
        let doc = build(&app, 200);
        let text: Vec<String> = doc.lines.iter().map(|l| l.to_string()).collect();
        assert!(
            text.iter()
                .any(|l| l.contains("https://kumotokumo-1305521879.cos.ap-guangzhou.myqcloud.com/"))
        );
    }

    #[test]
    fn missing_project_shows_message() {
        let app = detail_app("nope");
        let doc = build(&app, 60);
        assert!(doc.lines[1].to_string().contains("no longer exists"));
        assert!(doc.image_spans.is_empty());
    }

    #[test]
    fn rail_marks_active_image() {
        let mut app = detail_app("methodology");
        app.rail.active = Some(1);
        let out = render_to_string(RAIL_WIDTH, 6, |frame, area| {
            render_rail(frame, &app, area);
        });
        assert_eq!(out, " [ ]\n   01\n \u{25B6} 02");
    }

    #[test]
    fn detail_screen_renders_intro() {
        let mut app = detail_app("methodology");
        let out = render_app(&mut app);
        let title = app.session.selected_project().unwrap().title.clone();
        assert!(out.contains(&title));
        assert!(out.contains("ROLE"));
        assert!(out.lines().all(|l| display_width(l) <= TERM_W as usize));
    }

    #[test]
    fn long_tags_wrap_under_label() {
        let app = detail_app("methodology");
        let doc = build(&app, 36);
        let rows: Vec<String> = doc.lines.iter().map(|l| l.to_string()).collect();
        let tags_at = rows.iter().position(|r| r.starts_with(" TAGS  ")).unwrap();
        assert!(rows[..tags_at + 3].iter().all(|r| display_width(r) <= 36));
        assert!(rows[tags_at + 1].starts_with("       #"));
    }
}
