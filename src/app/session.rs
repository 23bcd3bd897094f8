use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app::router::{NavOutcome, Router};
use crate::app::state::{Action, AppState, ConfirmAction, Notice, PendingConfirm};
use crate::io::dataset::bundled_projects;
use crate::io::export::{ExportError, export_to};
use crate::io::recovery::{RecoveryCategory, RecoveryEntry, log_image_deletion, log_recovery};
use crate::io::saver::SaveWorker;
use crate::io::store::{ProjectStore, StoreError};
use crate::io::upload::{UploadError, read_image};
use crate::model::config::{FolioConfig, StartupSource};
use crate::model::project::Project;
use crate::model::view::{Screen, ViewState};
use crate::ops::edit::{EditCommand, EditError, check_image_index};
use crate::ops::filter::{filter_projects, find_project};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("nothing is waiting for confirmation")]
    NothingToConfirm,
}

/// Where an uploaded image goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Cover,
    Detail(usize),
    Append,
}

/// The live project list plus UI state and a persistence handle.
///
/// Edits are applied to the in-memory list first and then saved in the
/// background; a failed save is reported but never rolls the list back.
pub struct Session {
    projects: Vec<Project>,
    state: AppState,
    router: Router,
    store: Arc<dyn ProjectStore>,
    saver: SaveWorker,
    config: FolioConfig,
    data_dir: Option<PathBuf>,
}

impl Session {
    /// Open a session, choosing the initial list by `config.startup.source`.
    ///
    /// `data_dir` receives recovery log entries; pass `None` for sessions
    /// that should leave no trace on disk.
    pub fn open(store: Arc<dyn ProjectStore>, config: FolioConfig, data_dir: Option<PathBuf>) -> Self {
        let mut state = AppState::default();
        let (projects, seed) = match config.startup.source {
            StartupSource::Persisted => match store.load() {
                Ok(Some(projects)) => {
                    tracing::debug!(count = projects.len(), "loaded persisted projects");
                    (projects, false)
                }
                Ok(None) => {
                    tracing::info!("store is empty; seeding from the bundled dataset");
                    (bundled_projects(), true)
                }
                Err(e) => {
                    tracing::warn!("could not load store, using bundled dataset: {}", e);
                    if let Some(dir) = &data_dir {
                        log_recovery(
                            dir,
                            RecoveryEntry::new(RecoveryCategory::Load, "store unreadable")
                                .field("Error", e.to_string()),
                        );
                    }
                    state = state.apply(Action::Notify(Notice::error(format!(
                        "saved edits could not be loaded ({}); showing bundled projects",
                        e
                    ))));
                    (bundled_projects(), false)
                }
            },
            StartupSource::Bundled => (bundled_projects(), true),
        };

        let mut saver = SaveWorker::spawn(store.clone(), data_dir.clone());
        if seed {
            saver.submit(projects.clone());
        }

        Session {
            projects,
            state,
            router: Router::new(config.ui.menu_close_delay()),
            store,
            saver,
            config,
            data_dir,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Swap in a reloaded config. Startup source only matters at open, so
    /// it is ignored here.
    pub fn set_config(&mut self, config: FolioConfig) {
        self.router.set_delay(config.ui.menu_close_delay());
        self.config = config;
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = self.state.apply(action);
    }

    fn notify(&mut self, notice: Notice) {
        self.dispatch(Action::Notify(notice));
    }

    pub fn navigate(&mut self, screen: Screen, project: Option<&str>, now: Instant) -> NavOutcome {
        let (actions, outcome) = self.router.navigate(&self.state, screen, project, now);
        for action in actions {
            self.dispatch(action);
        }
        outcome
    }

    pub fn has_pending_navigation(&self) -> bool {
        self.router.pending().is_some()
    }

    /// Run time-driven work: due navigation and finished saves.
    /// Returns true when anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(action) = self.router.tick(now) {
            self.dispatch(action);
            changed = true;
        }
        changed |= self.collect_saves().is_some();
        changed
    }

    /// Report finished saves. Returns the first failure, if any finished
    /// save failed.
    fn collect_saves(&mut self) -> Option<Option<StoreError>> {
        let outcomes = self.saver.poll();
        if outcomes.is_empty() {
            return None;
        }
        let mut first_error = None;
        for outcome in outcomes {
            if let Err(e) = outcome.result {
                self.notify(Notice::error(format!(
                    "save failed, edits are kept in memory only: {}",
                    e
                )));
                first_error.get_or_insert(e);
            }
        }
        Some(first_error)
    }

    /// Block until queued saves finish. Returns the first save error.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.saver.flush();
        match self.collect_saves() {
            Some(Some(e)) => Err(e),
            _ => Ok(()),
        }
    }

    pub fn pending_saves(&self) -> u64 {
        self.saver.pending()
    }

    /// The project shown on the detail screen, looked up by id in the
    /// current list.
    pub fn selected_project(&self) -> Option<&Project> {
        let id = self.state.view.selected_project()?;
        find_project(&self.projects, id)
    }

    /// Projects on the portfolio screen under the current filter.
    pub fn visible_projects(&self) -> Vec<&Project> {
        filter_projects(&self.projects, self.state.filter)
    }

    /// Apply `cmd` now, then save in the background. Confirmation is the
    /// caller's job; see `request`.
    pub fn edit(&mut self, cmd: EditCommand) -> Result<(), SessionError> {
        let next = match cmd.apply(&self.projects) {
            Ok(next) => next,
            Err(e) => {
                self.notify(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        if let EditCommand::RemoveDetailImage { id, index } = &cmd
            && let Some(dir) = &self.data_dir
            && let Some(image) =
                find_project(&self.projects, id).and_then(|p| p.detail_images.get(*index))
        {
            log_image_deletion(dir, id, *index, image);
        }

        self.projects = next;
        tracing::debug!(id = cmd.project_id(), "{}", cmd.describe());
        self.notify(Notice::info(cmd.describe()));
        self.saver.submit(self.projects.clone());
        Ok(())
    }

    /// Apply `cmd`, or park it behind a confirmation prompt when it is
    /// destructive. Returns true when it was applied.
    pub fn request(&mut self, cmd: EditCommand) -> Result<bool, SessionError> {
        match cmd {
            EditCommand::RemoveDetailImage { id, index } => {
                // Validate now so the prompt never offers an impossible delete
                if let Err(e) = check_image_index(&self.projects, &id, index) {
                    self.notify(Notice::error(e.to_string()));
                    return Err(e.into());
                }
                let prompt = format!("Delete image {} of {}?", index + 1, id);
                self.dispatch(Action::RequestConfirm(PendingConfirm {
                    prompt,
                    action: ConfirmAction::RemoveImage { id, index },
                }));
                Ok(false)
            }
            other => self.edit(other).map(|()| true),
        }
    }

    pub fn request_reset(&mut self) {
        self.dispatch(Action::RequestConfirm(PendingConfirm {
            prompt: "Discard all edits and restore the bundled projects?".to_string(),
            action: ConfirmAction::Reset,
        }));
    }

    /// Run the operation waiting for confirmation.
    pub fn confirm(&mut self) -> Result<(), SessionError> {
        let pending = self
            .state
            .pending_confirm
            .clone()
            .ok_or(SessionError::NothingToConfirm)?;
        self.dispatch(Action::CancelConfirm);
        match pending.action {
            ConfirmAction::RemoveImage { id, index } => {
                self.edit(EditCommand::RemoveDetailImage { id, index })
            }
            ConfirmAction::Reset => {
                self.reset();
                Ok(())
            }
        }
    }

    pub fn cancel_confirm(&mut self) {
        self.dispatch(Action::CancelConfirm);
    }

    /// Read an image file and store it in `slot` of project `id`.
    ///
    /// Read errors (including files over the upload limit) leave the list
    /// untouched and nothing is saved.
    pub fn upload_image(&mut self, id: &str, slot: ImageSlot, path: &Path) -> Result<(), SessionError> {
        let image = match read_image(path, self.config.upload.max_bytes) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("upload rejected: {}", e);
                self.notify(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };
        let id = id.to_string();
        let cmd = match slot {
            ImageSlot::Cover => EditCommand::UpdateCover { id, image },
            ImageSlot::Detail(index) => EditCommand::UpdateDetailImage { id, index, image },
            ImageSlot::Append => EditCommand::AppendDetailImage { id, image },
        };
        self.edit(cmd)
    }

    /// Replace every edit with the bundled dataset and persist it.
    pub fn reset(&mut self) {
        self.projects = bundled_projects();
        if self.state.view.is_detail() && self.selected_project().is_none() {
            self.dispatch(Action::ShowView(ViewState::screen(Screen::Portfolio)));
        }
        tracing::info!(count = self.projects.len(), "restored bundled projects");
        self.notify(Notice::info("restored bundled projects"));
        self.saver.submit(self.projects.clone());
    }

    pub fn export(&mut self, path: &Path) -> Result<usize, SessionError> {
        match export_to(&self.projects, path) {
            Ok(n) => {
                self.notify(Notice::info(format!(
                    "exported {} projects to {}",
                    n,
                    path.display()
                )));
                Ok(n)
            }
            Err(e) => {
                self.notify(Notice::error(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Pick up changes another process saved. Skipped while this session
    /// still has saves in flight. Returns true when the list changed.
    pub fn reload(&mut self) -> Result<bool, StoreError> {
        if self.saver.pending() > 0 {
            return Ok(false);
        }
        let Some(projects) = self.store.load()? else {
            return Ok(false);
        };
        if projects == self.projects {
            return Ok(false);
        }
        self.projects = projects;
        if self.state.view.is_detail() && self.selected_project().is_none() {
            self.dispatch(Action::ShowView(ViewState::screen(Screen::Portfolio)));
        }
        self.notify(Notice::info("reloaded changes saved elsewhere"));
        Ok(true)
    }
}
