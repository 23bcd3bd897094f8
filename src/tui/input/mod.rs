mod confirm;
mod mouse;
mod navigate;
mod prompt;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};

use super::app::{App, Mode};

// Submodules reach each other's handlers via `use super::*;`
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use mouse::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use prompt::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Confirmation popup intercepts all input
    if app.session.state().pending_confirm.is_some() {
        handle_confirm(app, key);
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Prompt => handle_prompt(app, key),
    }
}

/// Handle a mouse event: pointer effects, wheel scrolling, clicks.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    handle_pointer(app, mouse);
}
