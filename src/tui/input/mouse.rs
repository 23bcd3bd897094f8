use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::Action;
use crate::model::view::Screen;
use crate::tui::app::{App, HitTarget};

const WHEEL_ROWS: i32 = 3;

pub(super) fn handle_pointer(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let targets = app.layout.project_rects();
            app.cursor = app.cursor.moved(mouse.column, mouse.row, &targets);
        }
        MouseEventKind::ScrollDown if !app.session.state().menu_open => app.scroll_by(WHEEL_ROWS),
        MouseEventKind::ScrollUp if !app.session.state().menu_open => app.scroll_by(-WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => click(app, mouse.column, mouse.row),
        _ => {}
    }
}

fn click(app: &mut App, x: u16, y: u16) {
    if app.session.state().pending_confirm.is_some() {
        return;
    }
    let menu_open = app.session.state().menu_open;
    match app.layout.hit(x, y).cloned() {
        Some(HitTarget::Screen(screen)) => app.go(screen, None),
        Some(HitTarget::Project(id)) if !menu_open => {
            app.go(Screen::ProjectDetail, Some(&id));
        }
        _ if menu_open => app.session.dispatch(Action::CloseMenu),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::handle_mouse;
    use crate::tui::render::test_helpers::{render_app, test_app};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click_at(app: &mut App, x: u16, y: u16) {
        handle_mouse(app, mouse(MouseEventKind::Down(MouseButton::Left), x, y));
    }

    fn target_pos(app: &App, target: &HitTarget) -> (u16, u16) {
        let (rect, _) = app
            .layout
            .hits
            .iter()
            .find(|(_, t)| t == target)
            .unwrap();
        (rect.x, rect.y)
    }

    #[test]
    fn clicking_a_tab_switches_screen() {
        let mut app = test_app();
        render_app(&mut app);
        let (x, y) = target_pos(&app, &HitTarget::Screen(Screen::About));
        click_at(&mut app, x, y);
        assert_eq!(app.screen(), Screen::About);
    }

    #[test]
    fn clicking_a_card_opens_project() {
        let mut app = test_app();
        app.go(Screen::Portfolio, None);
        render_app(&mut app);
        let target = HitTarget::Project("clackyai-web".into());
        let (x, y) = target_pos(&app, &target);
        click_at(&mut app, x + 2, y + 1);
        assert_eq!(
            app.session.state().view.selected_project(),
            Some("clackyai-web")
        );
    }

    #[test]
    fn click_outside_menu_closes_it() {
        let mut app = test_app();
        app.session.dispatch(Action::ToggleMenu);
        render_app(&mut app);
        click_at(&mut app, 0, 23);
        assert!(!app.session.state().menu_open);
        assert_eq!(app.screen(), Screen::Home);
    }

    #[test]
    fn wheel_scrolls_unless_menu_open() {
        let mut app = test_app();
        app.go(Screen::ProjectDetail, Some("clackyai-ui"));
        render_app(&mut app);
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollDown, 10, 10));
        let scrolled = app.scroll_y();
        assert!(scrolled > 0);

        app.session.dispatch(Action::ToggleMenu);
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollDown, 10, 10));
        assert_eq!(app.scroll_y(), scrolled);
    }

    #[test]
    fn hovering_a_card_grows_cursor() {
        let mut app = test_app();
        app.go(Screen::Portfolio, None);
        render_app(&mut app);
        let (x, y) = target_pos(&app, &HitTarget::Project("clackyai-ui".into()));
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, x + 1, y + 1));
        assert!(app.cursor.hovering);
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 0, 0));
        assert!(!app.cursor.hovering);
    }
}
