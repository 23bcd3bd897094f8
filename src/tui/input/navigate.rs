use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Action;
use crate::io::export::default_export_name;
use crate::model::project::ProjectField;
use crate::model::view::Screen;
use crate::ops::edit::EditCommand;
use crate::ops::filter::next_project;
use crate::tui::app::{App, PromptKind};

use super::*;

/// Screen selected by a digit or letter shortcut.
fn screen_for_key(code: KeyCode) -> Option<Screen> {
    match code {
        KeyCode::Char('1') | KeyCode::Char('h') => Some(Screen::Home),
        KeyCode::Char('2') | KeyCode::Char('p') => Some(Screen::Portfolio),
        KeyCode::Char('3') | KeyCode::Char('a') => Some(Screen::About),
        KeyCode::Char('4') | KeyCode::Char('c') => Some(Screen::Contact),
        _ => None,
    }
}

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let half = (app.layout.viewport_rows() / 2).max(1) as i32;
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('d') => app.scroll_by(half),
            KeyCode::Char('u') => app.scroll_by(-half),
            _ => {}
        }
        return;
    }

    if let Some(screen) = screen_for_key(key.code) {
        app.go(screen, None);
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('m') => {
            app.session.dispatch(Action::ToggleMenu);
            return;
        }
        _ => {}
    }

    // With the menu open only screen keys, m, Esc and q do anything
    if app.session.state().menu_open {
        if key.code == KeyCode::Esc {
            app.session.dispatch(Action::CloseMenu);
        }
        return;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => move_down(app),
        KeyCode::Char('k') | KeyCode::Up => move_up(app),
        KeyCode::PageDown | KeyCode::Char(' ') => {
            let page = app.layout.viewport_rows().saturating_sub(2).max(1) as i32;
            app.scroll_by(page);
        }
        KeyCode::PageUp => {
            let page = app.layout.viewport_rows().saturating_sub(2).max(1) as i32;
            app.scroll_by(-page);
        }
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to(0),
        KeyCode::Char('G') | KeyCode::End => {
            let max = app.max_scroll();
            app.scroll_to(max);
        }
        KeyCode::Enter => open_selected(app),
        KeyCode::Esc | KeyCode::Backspace => go_back(app),
        KeyCode::Char('f') if app.screen() == Screen::Portfolio => {
            let next = app.session.state().filter.next();
            app.session.dispatch(Action::SetFilter(next));
            app.portfolio_cursor = 0;
        }
        KeyCode::Char('n') => open_next_project(app),
        KeyCode::Char(']') => step_image(app, 1),
        KeyCode::Char('[') => step_image(app, -1),
        KeyCode::Char('e' | 'i' | 'I' | 'C' | 'd' | 'x' | 'R') if !app.is_admin() => {}
        KeyCode::Char('e') => start_field_prompt(app, ProjectField::Title),
        KeyCode::Char('i') => start_image_prompt(app, PromptKind::AppendImage),
        KeyCode::Char('I') => {
            if let Some(index) = target_image(app) {
                start_image_prompt(app, PromptKind::ReplaceImage(index));
            }
        }
        KeyCode::Char('C') => start_image_prompt(app, PromptKind::Cover),
        KeyCode::Char('d') => request_delete(app),
        KeyCode::Char('x') => {
            let name = default_export_name(chrono::Local::now());
            open_prompt(app, PromptKind::Export, String::new(), name);
        }
        KeyCode::Char('R') => app.session.request_reset(),
        _ => {}
    }
}

fn move_down(app: &mut App) {
    if app.screen() == Screen::Portfolio {
        let count = app.session.visible_projects().len();
        if count > 0 {
            app.portfolio_cursor = (app.portfolio_cursor + 1).min(count - 1);
            app.ensure_card_visible(app.portfolio_cursor);
        }
    } else {
        app.scroll_by(1);
    }
}

fn move_up(app: &mut App) {
    if app.screen() == Screen::Portfolio {
        app.portfolio_cursor = app.portfolio_cursor.saturating_sub(1);
        app.ensure_card_visible(app.portfolio_cursor);
    } else {
        app.scroll_by(-1);
    }
}

fn open_selected(app: &mut App) {
    match app.screen() {
        Screen::Home => app.go(Screen::Portfolio, None),
        Screen::Portfolio => {
            let id = app
                .session
                .visible_projects()
                .get(app.portfolio_cursor)
                .map(|p| p.id.clone());
            if let Some(id) = id {
                app.go(Screen::ProjectDetail, Some(&id));
            }
        }
        _ => {}
    }
}

fn go_back(app: &mut App) {
    if app.screen() == Screen::ProjectDetail {
        app.go(Screen::Portfolio, None);
    } else if app.session.state().notice.is_some() {
        app.session.dispatch(Action::ClearNotice);
    }
}

fn open_next_project(app: &mut App) {
    let Some(current) = app.session.state().view.selected_project() else {
        return;
    };
    let next = next_project(app.session.projects(), current).map(|p| p.id.clone());
    if let Some(id) = next {
        app.go(Screen::ProjectDetail, Some(&id));
    }
}

fn image_count(app: &App) -> usize {
    app.session
        .selected_project()
        .map_or(0, |p| p.detail_images.len())
}

/// The image detail edits act on: the active one, else the first.
fn target_image(app: &App) -> Option<usize> {
    let count = image_count(app);
    if count == 0 {
        return None;
    }
    Some(app.rail.active.unwrap_or(0).min(count - 1))
}

fn step_image(app: &mut App, delta: isize) {
    let count = image_count(app);
    if count == 0 {
        return;
    }
    let target = match app.rail.active {
        Some(i) => i.saturating_add_signed(delta).min(count - 1),
        None => 0,
    };
    app.jump_to_image(target);
}

fn request_delete(app: &mut App) {
    let (Some(project), Some(index)) = (app.session.selected_project(), target_image(app)) else {
        return;
    };
    let cmd = EditCommand::RemoveDetailImage {
        id: project.id.clone(),
        index,
    };
    if let Err(e) = app.session.request(cmd) {
        tracing::debug!("delete not offered: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ConfirmAction;
    use crate::model::project::Category;
    use crate::ops::filter::CategoryFilter;
    use crate::tui::app::Mode;
    use crate::tui::render::test_helpers::{render_app, test_app, visitor_app};
    use pretty_assertions::assert_eq;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ch(app: &mut App, c: char) {
        press(app, KeyCode::Char(c));
    }

    #[test]
    fn digits_switch_screens() {
        let mut app = test_app();
        ch(&mut app, '3');
        assert_eq!(app.screen(), Screen::About);
        ch(&mut app, 'p');
        assert_eq!(app.screen(), Screen::Portfolio);
    }

    #[test]
    fn menu_defers_navigation() {
        let mut app = test_app();
        ch(&mut app, 'm');
        assert!(app.session.state().menu_open);
        ch(&mut app, '4');
        assert!(!app.session.state().menu_open);
        assert_eq!(app.screen(), Screen::Home);
        assert!(app.session.has_pending_navigation());
    }

    #[test]
    fn menu_swallows_other_keys() {
        let mut app = test_app();
        ch(&mut app, 'm');
        ch(&mut app, 'x');
        assert_eq!(app.mode, Mode::Navigate);
        press(&mut app, KeyCode::Esc);
        assert!(!app.session.state().menu_open);
    }

    #[test]
    fn portfolio_cursor_and_open() {
        let mut app = test_app();
        ch(&mut app, '2');
        render_app(&mut app);
        ch(&mut app, 'j');
        ch(&mut app, 'j');
        assert_eq!(app.portfolio_cursor, 2);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.state().view.selected_project(), Some("showmebug-ui"));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Portfolio);
    }

    #[test]
    fn cursor_movement_scrolls_card_into_view() {
        let mut app = test_app();
        ch(&mut app, '2');
        render_app(&mut app);
        for _ in 0..6 {
            ch(&mut app, 'j');
        }
        let (top, height) = app.layout.card_rows[6];
        let scroll = app.scroll_y();
        assert!(top >= scroll);
        assert!(top + height <= scroll + app.layout.viewport_rows());
    }

    #[test]
    fn filter_cycles_and_resets_cursor() {
        let mut app = test_app();
        ch(&mut app, '2');
        ch(&mut app, 'j');
        ch(&mut app, 'f');
        assert_eq!(
            app.session.state().filter,
            CategoryFilter::Only(Category::UiUx)
        );
        assert_eq!(app.portfolio_cursor, 0);
    }

    #[test]
    fn next_project_resets_scroll() {
        let mut app = test_app();
        app.go(Screen::ProjectDetail, Some("clackyai-ui"));
        render_app(&mut app);
        app.scroll_to(30);
        assert_eq!(app.scroll_y(), 30);
        ch(&mut app, 'n');
        assert_eq!(app.session.state().view.selected_project(), Some("clackyai-web"));
        assert_eq!(app.scroll_y(), 0);
    }

    #[test]
    fn bracket_keys_jump_between_images() {
        let mut app = test_app();
        app.go(Screen::ProjectDetail, Some("clackyai-ui"));
        render_app(&mut app);
        ch(&mut app, ']');
        app.on_frame();
        assert_eq!(app.rail.active, Some(0));
        ch(&mut app, ']');
        app.on_frame();
        assert_eq!(app.rail.active, Some(1));
        ch(&mut app, '[');
        app.on_frame();
        assert_eq!(app.rail.active, Some(0));
    }

    #[test]
    fn delete_asks_for_confirmation() {
        let mut app = test_app();
        app.go(Screen::ProjectDetail, Some("methodology"));
        ch(&mut app, 'd');
        let pending = app.session.state().pending_confirm.clone().unwrap();
        assert_eq!(
            pending.action,
            ConfirmAction::RemoveImage {
                id: "methodology".into(),
                index: 0,
            }
        );
    }

    #[test]
    fn edit_keys_ignored_off_detail() {
        let mut app = test_app();
        ch(&mut app, 'e');
        ch(&mut app, 'd');
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.session.state().pending_confirm.is_none());
    }

    #[test]
    fn visitors_cannot_edit() {
        let mut app = visitor_app();
        app.go(Screen::ProjectDetail, Some("methodology"));
        let before = app.session.projects().to_vec();
        for c in ['e', 'i', 'I', 'C', 'd', 'x', 'R'] {
            ch(&mut app, c);
            assert_eq!(app.mode, Mode::Navigate, "key {c}");
            assert!(app.prompt.is_none());
            assert!(app.session.state().pending_confirm.is_none());
        }
        assert_eq!(app.session.projects(), &before[..]);

        // Browsing still works
        ch(&mut app, ']');
        ch(&mut app, 'n');
        assert_eq!(app.session.state().view.screen, Screen::ProjectDetail);
    }

    #[test]
    fn export_prompt_suggests_timestamped_name() {
        let mut app = test_app();
        ch(&mut app, 'x');
        let prompt = app.prompt.as_ref().unwrap();
        assert_eq!(prompt.kind, PromptKind::Export);
        assert!(prompt.buffer.starts_with("portfolio-export-"));
    }
}
