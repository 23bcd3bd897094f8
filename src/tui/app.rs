use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::app::{Action, Session};
use crate::io::config_io::read_config;
use crate::io::dataset::bundled_profile;
use crate::io::store::ProjectStore;
use crate::io::watcher::{DataEvent, DataWatcher};
use crate::model::config::FolioConfig;
use crate::model::profile::Profile;
use crate::model::project::ProjectField;
use crate::model::view::Screen;
use crate::ops::rail::{FrameThrottle, ImageSpan, RailTracker, back_to_top_visible, image_offset};

use super::cursor::CursorState;
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Prompt,
}

/// What the status-row prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Field(ProjectField),
    /// File path or URL for a new detail image
    AppendImage,
    ReplaceImage(usize),
    Cover,
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    /// Project being edited; empty for prompts not tied to one
    pub project_id: String,
    pub buffer: String,
}

/// A clickable region recorded during the last draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Screen(Screen),
    Project(String),
}

/// Geometry of the last drawn frame, used by input handling.
#[derive(Debug, Clone, Default)]
pub struct FrameLayout {
    pub content: Rect,
    /// Total rows of the scrollable document
    pub content_rows: u16,
    /// Detail-image blocks in document rows
    pub image_spans: Vec<ImageSpan>,
    /// Project cards in document rows: (top, height)
    pub card_rows: Vec<(u16, u16)>,
    /// Clickable rects in screen coordinates
    pub hits: Vec<(Rect, HitTarget)>,
}

impl FrameLayout {
    pub fn viewport_rows(&self) -> u16 {
        self.content.height
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<&HitTarget> {
        let pos = ratatui::layout::Position::new(x, y);
        self.hits
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, target)| target)
    }

    pub fn project_rects(&self) -> Vec<Rect> {
        self.hits
            .iter()
            .filter(|(_, t)| matches!(t, HitTarget::Project(_)))
            .map(|(r, _)| *r)
            .collect()
    }
}

/// Main application state
pub struct App {
    pub session: Session,
    pub profile: Profile,
    pub theme: Theme,
    pub mode: Mode,
    pub prompt: Option<Prompt>,
    pub should_quit: bool,
    /// Highlighted card on the portfolio screen (index into the filtered list)
    pub portfolio_cursor: usize,
    pub rail: RailTracker,
    pub throttle: FrameThrottle,
    pub cursor: CursorState,
    pub layout: FrameLayout,
    /// Directory for exports and relative paths typed at prompts
    pub work_dir: PathBuf,
}

impl App {
    pub fn new(session: Session, profile: Profile) -> Self {
        let theme = Theme::from_config(&session.config().ui);
        App {
            session,
            profile,
            theme,
            mode: Mode::Navigate,
            prompt: None,
            should_quit: false,
            portfolio_cursor: 0,
            rail: RailTracker::new(),
            throttle: FrameThrottle::default(),
            cursor: CursorState::default(),
            layout: FrameLayout::default(),
            work_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn screen(&self) -> Screen {
        self.session.state().view.screen
    }

    pub fn scroll_y(&self) -> u16 {
        self.session.state().scroll_y
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout
            .content_rows
            .saturating_sub(self.layout.viewport_rows())
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.max_scroll();
        self.session.dispatch(Action::ScrollBy { delta, max });
        self.throttle.request();
    }

    pub fn scroll_to(&mut self, row: u16) {
        let row = row.min(self.max_scroll());
        self.session.dispatch(Action::ScrollTo(row));
        self.throttle.request();
    }

    /// Navigate and reset per-screen trackers.
    pub fn go(&mut self, screen: Screen, project: Option<&str>) {
        self.session.navigate(screen, project, Instant::now());
        self.reset_trackers();
    }

    /// Editing keys are only live in owner mode.
    pub fn is_admin(&self) -> bool {
        self.session.config().ui.admin
    }

    fn reset_trackers(&mut self) {
        self.rail = RailTracker::new();
        self.layout.image_spans.clear();
        self.throttle.request();
    }

    /// Land due navigation and collect finished saves.
    pub fn tick(&mut self, now: Instant) {
        let before = self.session.state().view.clone();
        if self.session.tick(now) {
            self.throttle.request();
        }
        if self.session.state().view != before {
            self.reset_trackers();
        }
    }

    /// Once-per-frame work that scroll events only schedule.
    pub fn on_frame(&mut self) {
        if self.throttle.take() {
            let scroll_y = self.scroll_y();
            let viewport = self.layout.viewport_rows();
            if let Some(state) = self.rail.update(&self.layout.image_spans, scroll_y, viewport) {
                tracing::trace!(?state, "rail");
            }
        }
    }

    /// Scroll so detail image `index` sits in the middle of the viewport,
    /// which is where the rail looks for the active image.
    pub fn jump_to_image(&mut self, index: usize) {
        let Some(top) = image_offset(&self.layout.image_spans, index) else {
            return;
        };
        let height = self.layout.image_spans[index].height;
        let center = top.saturating_add(height / 2);
        self.scroll_to(center.saturating_sub(self.layout.viewport_rows() / 2));
    }

    /// Scroll the minimum needed to show portfolio card `index`.
    pub fn ensure_card_visible(&mut self, index: usize) {
        let Some(&(top, height)) = self.layout.card_rows.get(index) else {
            return;
        };
        let scroll = self.scroll_y();
        let viewport = self.layout.viewport_rows();
        if top < scroll {
            self.scroll_to(top.saturating_sub(1));
        } else if top + height > scroll + viewport {
            self.scroll_to((top + height + 1).saturating_sub(viewport));
        }
    }

    pub fn back_to_top_visible(&self) -> bool {
        back_to_top_visible(
            self.scroll_y(),
            self.session.config().ui.back_to_top_rows,
            self.session.state().menu_open,
        )
    }

    /// Resolve a path typed at a prompt: `~/` expands to $HOME, relative
    /// paths are taken from the working directory.
    pub fn resolve_input_path(&self, input: &str) -> PathBuf {
        let input = input.trim();
        if let Some(rest) = input.strip_prefix("~/")
            && let Some(home) = std::env::var_os("HOME")
        {
            return PathBuf::from(home).join(rest);
        }
        let path = Path::new(input);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }
}

/// Run the TUI application
pub fn run(
    data_dir: &Path,
    config: FolioConfig,
    store: Arc<dyn ProjectStore>,
    persist: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let recovery_dir = persist.then(|| data_dir.to_path_buf());
    let session = Session::open(store, config, recovery_dir);
    let mut app = App::new(session, bundled_profile());

    // Missing data dir just means no live reload
    let watcher = if persist {
        match DataWatcher::start(data_dir) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!("file watching disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref(), data_dir);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = app.session.flush() {
        eprintln!("warning: last save failed: {}", e);
    }
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&DataWatcher>,
    data_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        if let Some(w) = watcher {
            for evt in w.poll() {
                handle_data_event(app, evt, data_dir);
            }
        }
        app.on_frame();

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Resize(..) => {
                    app.throttle.request();
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_data_event(app: &mut App, evt: DataEvent, data_dir: &Path) {
    match evt {
        DataEvent::StoreChanged => match app.session.reload() {
            Ok(true) => {
                app.portfolio_cursor = 0;
                app.throttle.request();
            }
            Ok(false) => {}
            Err(e) => tracing::warn!("could not reload store: {}", e),
        },
        DataEvent::ConfigChanged => match read_config(data_dir) {
            Ok(mut config) => {
                // Owner mode from --admin survives a reload
                config.ui.admin |= app.is_admin();
                app.theme = Theme::from_config(&config.ui);
                app.session.set_config(config);
            }
            Err(e) => {
                tracing::warn!("ignoring folio.toml change: {}", e);
                app.session
                    .dispatch(Action::Notify(crate::app::Notice::error(e.to_string())));
            }
        },
    }
}
