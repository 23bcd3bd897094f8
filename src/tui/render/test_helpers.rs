use std::sync::Arc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::app::Session;
use crate::io::dataset::{bundled_profile, bundled_projects};
use crate::io::store::MemoryStore;
use crate::model::config::FolioConfig;
use crate::tui::app::App;
use crate::tui::wrap::display_width;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            // A wide glyph owns the cells after it; skip them so the text
            // measures the same as the row.
            let mut s = String::new();
            let mut covered = 0;
            for cell in row {
                if covered > 0 {
                    covered -= 1;
                    continue;
                }
                s.push_str(cell.symbol());
                covered = display_width(cell.symbol()).saturating_sub(1);
            }
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An owner's app over the bundled dataset, backed by an in-memory store.
pub fn test_app() -> App {
    let mut config = FolioConfig::default();
    config.ui.admin = true;
    test_app_with(config)
}

/// The same app as a visitor sees it: editing keys are off.
pub fn visitor_app() -> App {
    test_app_with(FolioConfig::default())
}

pub fn test_app_with(config: FolioConfig) -> App {
    let store = Arc::new(MemoryStore::with_records(bundled_projects()));
    let session = Session::open(store, config, None);
    App::new(session, bundled_profile())
}

/// Draw the whole UI once at the default terminal size.
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| {
        super::render(frame, app);
    })
}
