use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y')) | (KeyModifiers::SHIFT, KeyCode::Char('Y')) => {
            if let Err(e) = app.session.confirm() {
                tracing::debug!("confirmed operation failed: {}", e);
            }
            clamp_after_change(app);
        }
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.session.cancel_confirm();
        }
        _ => {}
    }
}

/// Keep cursors and scroll in range after the list changed underneath.
pub(super) fn clamp_after_change(app: &mut App) {
    let visible = app.session.visible_projects().len();
    app.portfolio_cursor = app.portfolio_cursor.min(visible.saturating_sub(1));
    let max = app.max_scroll();
    if app.scroll_y() > max {
        app.scroll_to(max);
    }
    app.throttle.request();
}
