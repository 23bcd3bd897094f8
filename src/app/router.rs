use std::time::{Duration, Instant};

use crate::app::state::{Action, AppState};
use crate::model::view::{Screen, ViewState};

/// A screen swap scheduled to run once the menu has finished closing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub target: ViewState,
    pub due: Instant,
}

/// What `Router::navigate` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOutcome {
    /// The swap was scheduled instead of applied.
    pub deferred: bool,
    /// Scroll was reset before returning, independent of the swap.
    pub scroll_reset_now: bool,
}

/// Turns navigation requests into state actions.
///
/// With the overlay menu open, the screen swap waits `delay` so the close
/// animation can play. Only one swap is ever pending: a new request cancels
/// the previous one.
#[derive(Debug, Clone)]
pub struct Router {
    delay: Duration,
    pending: Option<PendingNavigation>,
}

impl Router {
    pub fn new(delay: Duration) -> Self {
        Router {
            delay,
            pending: None,
        }
    }

    /// Applies to requests made from now on.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn pending(&self) -> Option<&PendingNavigation> {
        self.pending.as_ref()
    }

    /// Navigate to `screen`, or to the detail screen of `project` when one is
    /// given. Returns the actions to apply now.
    pub fn navigate(
        &mut self,
        state: &AppState,
        screen: Screen,
        project: Option<&str>,
        now: Instant,
    ) -> (Vec<Action>, NavOutcome) {
        let target = match project {
            Some(id) => ViewState::detail(id),
            None => ViewState::screen(screen),
        };
        if let Some(stale) = self.pending.take() {
            tracing::debug!(target = ?stale.target.screen, "pending navigation cancelled");
        }

        let detail_to_detail = state.view.is_detail() && target.is_detail();
        let mut actions = vec![Action::CloseMenu];
        let mut outcome = NavOutcome {
            deferred: false,
            scroll_reset_now: false,
        };

        if detail_to_detail {
            actions.push(Action::ScrollTo(0));
            outcome.scroll_reset_now = true;
        }

        if state.menu_open && !detail_to_detail && !self.delay.is_zero() {
            tracing::debug!(target = ?target.screen, delay_ms = self.delay.as_millis() as u64, "navigation deferred");
            self.pending = Some(PendingNavigation {
                target,
                due: now + self.delay,
            });
            outcome.deferred = true;
        } else {
            tracing::debug!(target = ?target.screen, "navigate");
            actions.push(Action::ShowView(target));
        }
        (actions, outcome)
    }

    /// Release the pending swap once it is due.
    pub fn tick(&mut self, now: Instant) -> Option<Action> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            return self.pending.take().map(|p| Action::ShowView(p.target));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DELAY: Duration = Duration::from_millis(500);

    fn run(state: &AppState, actions: Vec<Action>) -> AppState {
        actions.into_iter().fold(state.clone(), |s, a| s.apply(a))
    }

    #[test]
    fn closed_menu_navigates_immediately() {
        let mut router = Router::new(DELAY);
        let state = AppState::default().apply(Action::ScrollTo(20));
        let (actions, outcome) = router.navigate(&state, Screen::About, None, Instant::now());
        assert!(!outcome.deferred);
        let state = run(&state, actions);
        assert_eq!(state.view, ViewState::screen(Screen::About));
        assert_eq!(state.scroll_y, 0);
        assert!(router.pending().is_none());
    }

    #[test]
    fn open_menu_defers_swap() {
        let mut router = Router::new(DELAY);
        let start = Instant::now();
        let state = AppState::default().apply(Action::ToggleMenu);
        let (actions, outcome) = router.navigate(&state, Screen::Contact, None, start);
        assert!(outcome.deferred);

        let state = run(&state, actions);
        assert!(!state.menu_open);
        assert_eq!(state.view.screen, Screen::Home);

        assert_eq!(router.tick(start + Duration::from_millis(499)), None);
        let action = router.tick(start + DELAY).unwrap();
        assert_eq!(state.apply(action).view.screen, Screen::Contact);
        assert!(router.pending().is_none());
    }

    #[test]
    fn new_navigation_cancels_pending_one() {
        let mut router = Router::new(DELAY);
        let start = Instant::now();
        let state = AppState::default().apply(Action::ToggleMenu);
        let (actions, _) = router.navigate(&state, Screen::Contact, None, start);
        let state = run(&state, actions);

        // Menu already closed, so this one is immediate and the old swap dies
        let (actions, outcome) = router.navigate(&state, Screen::About, None, start);
        assert!(!outcome.deferred);
        let state = run(&state, actions);
        assert_eq!(state.view.screen, Screen::About);
        assert_eq!(router.tick(start + DELAY * 2), None);
    }

    #[test]
    fn project_argument_selects_detail() {
        let mut router = Router::new(DELAY);
        let state = AppState::default();
        let (actions, _) = router.navigate(&state, Screen::Home, Some("methodology"), Instant::now());
        let state = run(&state, actions);
        assert_eq!(state.view, ViewState::detail("methodology"));
    }

    #[test]
    fn detail_to_detail_resets_scroll_without_deferral() {
        let mut router = Router::new(DELAY);
        let state = AppState::default()
            .apply(Action::ShowView(ViewState::detail("a")))
            .apply(Action::ScrollTo(80))
            .apply(Action::ToggleMenu);
        let (actions, outcome) =
            router.navigate(&state, Screen::ProjectDetail, Some("b"), Instant::now());
        assert_eq!(
            outcome,
            NavOutcome {
                deferred: false,
                scroll_reset_now: true,
            }
        );
        assert_eq!(actions[1], Action::ScrollTo(0));
        let state = run(&state, actions);
        assert_eq!(state.view, ViewState::detail("b"));
        assert_eq!(state.scroll_y, 0);
        assert!(router.pending().is_none());
    }

    #[test]
    fn zero_delay_never_defers() {
        let mut router = Router::new(Duration::ZERO);
        let state = AppState::default().apply(Action::ToggleMenu);
        let (_, outcome) = router.navigate(&state, Screen::About, None, Instant::now());
        assert!(!outcome.deferred);
    }
}
