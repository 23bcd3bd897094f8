use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named screens of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    Home,
    Portfolio,
    About,
    Contact,
    ProjectDetail,
}

impl Screen {
    /// Screens reachable from the header menu, in menu order.
    pub const MENU: [Screen; 4] = [Screen::Home, Screen::Portfolio, Screen::About, Screen::Contact];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Home => "HOME",
            Screen::Portfolio => "PORTFOLIO",
            Screen::About => "ABOUT",
            Screen::Contact => "CONTACT",
            Screen::ProjectDetail => "PROJECT",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Screen::Home),
            "portfolio" => Ok(Screen::Portfolio),
            "about" => Ok(Screen::About),
            "contact" => Ok(Screen::Contact),
            "project" | "project_detail" | "detail" => Ok(Screen::ProjectDetail),
            _ => Err(format!("unknown screen: {}", s)),
        }
    }
}

/// Which screen is showing, plus the selected project when on the detail
/// screen. `selected` is ignored for every other screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub screen: Screen,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            screen: Screen::Home,
            selected: None,
        }
    }
}

impl ViewState {
    pub fn screen(screen: Screen) -> Self {
        ViewState {
            screen,
            selected: None,
        }
    }

    pub fn detail(project_id: impl Into<String>) -> Self {
        ViewState {
            screen: Screen::ProjectDetail,
            selected: Some(project_id.into()),
        }
    }

    /// The selected project id, only when the detail screen is showing.
    pub fn selected_project(&self) -> Option<&str> {
        match self.screen {
            Screen::ProjectDetail => self.selected.as_deref(),
            _ => None,
        }
    }

    pub fn is_detail(&self) -> bool {
        self.screen == Screen::ProjectDetail
    }
}
