use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::ImageSlot;
use crate::io::image::is_absolute;
use crate::model::project::ProjectField;
use crate::ops::edit::EditCommand;
use crate::tui::app::{App, Mode, Prompt, PromptKind};

use super::*;

pub(super) fn open_prompt(app: &mut App, kind: PromptKind, project_id: String, buffer: String) {
    app.prompt = Some(Prompt {
        kind,
        project_id,
        buffer,
    });
    app.mode = Mode::Prompt;
}

/// Start editing `field` of the selected project, prefilled with its value.
pub(super) fn start_field_prompt(app: &mut App, field: ProjectField) {
    let Some(project) = app.session.selected_project() else {
        return;
    };
    let id = project.id.clone();
    let value = field.value_of(project);
    open_prompt(app, PromptKind::Field(field), id, value);
}

/// Ask for an image path or URL for the selected project.
pub(super) fn start_image_prompt(app: &mut App, kind: PromptKind) {
    let Some(project) = app.session.selected_project() else {
        return;
    };
    let id = project.id.clone();
    open_prompt(app, kind, id, String::new());
}

fn close_prompt(app: &mut App) {
    app.prompt = None;
    app.mode = Mode::Navigate;
}

pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('u')
            && let Some(prompt) = app.prompt.as_mut()
        {
            prompt.buffer.clear();
        }
        return;
    }

    match key.code {
        KeyCode::Esc => close_prompt(app),
        KeyCode::Enter => {
            if let Some(prompt) = app.prompt.take() {
                app.mode = Mode::Navigate;
                submit(app, prompt);
            }
        }
        KeyCode::Backspace => {
            if let Some(prompt) = app.prompt.as_mut() {
                prompt.buffer.pop();
            }
        }
        KeyCode::Tab => cycle_field(app),
        KeyCode::Char(c) => {
            if let Some(prompt) = app.prompt.as_mut() {
                prompt.buffer.push(c);
            }
        }
        _ => {}
    }
}

/// Move a field prompt to the next editable field, discarding the typed value.
fn cycle_field(app: &mut App) {
    let Some(prompt) = app.prompt.as_ref() else {
        return;
    };
    let PromptKind::Field(field) = prompt.kind else {
        return;
    };
    let pos = ProjectField::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or(0);
    let next = ProjectField::ALL[(pos + 1) % ProjectField::ALL.len()];
    start_field_prompt(app, next);
}

fn submit(app: &mut App, prompt: Prompt) {
    let value = prompt.buffer.trim().to_string();
    let id = prompt.project_id;
    let result = match prompt.kind {
        PromptKind::Field(field) => app
            .session
            .request(EditCommand::UpdateField { id, field, value })
            .map(|_| ()),
        PromptKind::Export => {
            if value.is_empty() {
                return;
            }
            let path = app.resolve_input_path(&value);
            app.session.export(&path).map(|_| ())
        }
        kind => {
            if value.is_empty() {
                return;
            }
            let slot = match kind {
                PromptKind::Cover => ImageSlot::Cover,
                PromptKind::ReplaceImage(index) => ImageSlot::Detail(index),
                _ => ImageSlot::Append,
            };
            if is_absolute(&value) {
                let cmd = match slot {
                    ImageSlot::Cover => EditCommand::UpdateCover { id, image: value },
                    ImageSlot::Detail(index) => EditCommand::UpdateDetailImage {
                        id,
                        index,
                        image: value,
                    },
                    ImageSlot::Append => EditCommand::AppendDetailImage { id, image: value },
                };
                app.session.edit(cmd)
            } else {
                let path = app.resolve_input_path(&value);
                app.session.upload_image(&id, slot, &path)
            }
        }
    };
    // The session has already put the failure in the status row
    if let Err(e) = result {
        tracing::debug!("prompt rejected: {}", e);
    }
    clamp_after_change(app);
}
