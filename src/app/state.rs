use serde::{Deserialize, Serialize};

use crate::model::view::ViewState;
use crate::ops::filter::CategoryFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line message shown in the status row until replaced or cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Destructive operations that wait for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmAction {
    RemoveImage { id: String, index: usize },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConfirm {
    pub prompt: String,
    pub action: ConfirmAction,
}

/// Everything the UI shows besides the project list itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub view: ViewState,
    pub menu_open: bool,
    pub filter: CategoryFilter,
    /// First visible content row.
    pub scroll_y: u16,
    pub notice: Option<Notice>,
    pub pending_confirm: Option<PendingConfirm>,
}

/// Named state transitions. `AppState::apply` is the only way state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ToggleMenu,
    CloseMenu,
    SetFilter(CategoryFilter),
    ScrollTo(u16),
    /// Scroll by `delta` rows, clamped to `0..=max`.
    ScrollBy { delta: i32, max: u16 },
    Notify(Notice),
    ClearNotice,
    RequestConfirm(PendingConfirm),
    CancelConfirm,
    /// Swap the visible screen. Scroll returns to the top and the menu and
    /// any pending confirmation are dismissed.
    ShowView(ViewState),
}

impl AppState {
    /// Produce the state that follows `action`. `self` is left untouched.
    pub fn apply(&self, action: Action) -> AppState {
        let mut next = self.clone();
        match action {
            Action::ToggleMenu => next.menu_open = !self.menu_open,
            Action::CloseMenu => next.menu_open = false,
            Action::SetFilter(filter) => {
                next.filter = filter;
                next.scroll_y = 0;
            }
            Action::ScrollTo(row) => next.scroll_y = row,
            Action::ScrollBy { delta, max } => {
                let target = (self.scroll_y as i64 + delta as i64).clamp(0, max as i64);
                next.scroll_y = target as u16;
            }
            Action::Notify(notice) => next.notice = Some(notice),
            Action::ClearNotice => next.notice = None,
            Action::RequestConfirm(confirm) => next.pending_confirm = Some(confirm),
            Action::CancelConfirm => next.pending_confirm = None,
            Action::ShowView(view) => {
                next.view = view;
                next.scroll_y = 0;
                next.menu_open = false;
                next.pending_confirm = None;
            }
        }
        next
    }
}
