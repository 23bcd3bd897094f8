use crate::model::project::{Category, Project, ProjectField, parse_tags};

/// Error type for edit commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("project not found: {0}")]
    NotFound(String),
    #[error("image index {index} out of range for {id} ({len} detail images)")]
    IndexOutOfRange { id: String, index: usize, len: usize },
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: ProjectField, message: String },
}

/// One mutation of the project list, addressed by project id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    UpdateField {
        id: String,
        field: ProjectField,
        value: String,
    },
    UpdateCover {
        id: String,
        image: String,
    },
    UpdateDetailImage {
        id: String,
        index: usize,
        image: String,
    },
    AppendDetailImage {
        id: String,
        image: String,
    },
    RemoveDetailImage {
        id: String,
        index: usize,
    },
}

impl EditCommand {
    pub fn project_id(&self) -> &str {
        match self {
            EditCommand::UpdateField { id, .. }
            | EditCommand::UpdateCover { id, .. }
            | EditCommand::UpdateDetailImage { id, .. }
            | EditCommand::AppendDetailImage { id, .. }
            | EditCommand::RemoveDetailImage { id, .. } => id,
        }
    }

    /// Destructive commands must be confirmed by the user before applying.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, EditCommand::RemoveDetailImage { .. })
    }

    /// Short past-tense description for status messages.
    pub fn describe(&self) -> String {
        match self {
            EditCommand::UpdateField { field, .. } => format!("{} updated", field),
            EditCommand::UpdateCover { .. } => "cover image replaced".to_string(),
            EditCommand::UpdateDetailImage { index, .. } => {
                format!("image {} replaced", index + 1)
            }
            EditCommand::AppendDetailImage { .. } => "image added".to_string(),
            EditCommand::RemoveDetailImage { index, .. } => {
                format!("image {} deleted", index + 1)
            }
        }
    }

    /// Compute the list this command produces from `projects`.
    pub fn apply(&self, projects: &[Project]) -> Result<Vec<Project>, EditError> {
        match self {
            EditCommand::UpdateField { id, field, value } => {
                update_field(projects, id, *field, value)
            }
            EditCommand::UpdateCover { id, image } => update_cover(projects, id, image),
            EditCommand::UpdateDetailImage { id, index, image } => {
                update_detail_image(projects, id, *index, image)
            }
            EditCommand::AppendDetailImage { id, image } => {
                append_detail_image(projects, id, image)
            }
            EditCommand::RemoveDetailImage { id, index } => {
                remove_detail_image(projects, id, *index)
            }
        }
    }
}

/// Copy `projects`, replacing the record with `id` by `f(record)`.
/// Every other record is cloned unchanged.
fn map_project<F>(projects: &[Project], id: &str, f: F) -> Result<Vec<Project>, EditError>
where
    F: FnOnce(&Project) -> Result<Project, EditError>,
{
    let pos = projects
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| EditError::NotFound(id.to_string()))?;
    let replacement = f(&projects[pos])?;

    let mut out = Vec::with_capacity(projects.len());
    out.extend_from_slice(&projects[..pos]);
    out.push(replacement);
    out.extend_from_slice(&projects[pos + 1..]);
    Ok(out)
}

fn check_index(project: &Project, index: usize) -> Result<(), EditError> {
    let len = project.detail_images.len();
    if index >= len {
        return Err(EditError::IndexOutOfRange {
            id: project.id.clone(),
            index,
            len,
        });
    }
    Ok(())
}

/// Replace one named field's value on the matching record.
pub fn update_field(
    projects: &[Project],
    id: &str,
    field: ProjectField,
    value: &str,
) -> Result<Vec<Project>, EditError> {
    map_project(projects, id, |p| {
        let mut p = p.clone();
        match field {
            ProjectField::Title => p.title = value.to_string(),
            ProjectField::Subtitle => p.subtitle = value.to_string(),
            ProjectField::Description => p.description = value.to_string(),
            ProjectField::Role => p.role = value.to_string(),
            ProjectField::Year => p.year = value.trim().to_string(),
            ProjectField::Tags => p.tags = parse_tags(value),
            ProjectField::Category => {
                p.category = value
                    .parse::<Category>()
                    .map_err(|message| EditError::InvalidValue { field, message })?;
            }
        }
        Ok(p)
    })
}

/// Replace the cover image reference on the matching record.
pub fn update_cover(projects: &[Project], id: &str, image: &str) -> Result<Vec<Project>, EditError> {
    map_project(projects, id, |p| {
        let mut p = p.clone();
        p.cover_image = image.to_string();
        Ok(p)
    })
}

/// Replace the detail image at `index`. The index must already exist.
pub fn update_detail_image(
    projects: &[Project],
    id: &str,
    index: usize,
    image: &str,
) -> Result<Vec<Project>, EditError> {
    map_project(projects, id, |p| {
        check_index(p, index)?;
        let mut p = p.clone();
        p.detail_images[index] = image.to_string();
        Ok(p)
    })
}

/// Add one image to the end of the detail image list.
pub fn append_detail_image(
    projects: &[Project],
    id: &str,
    image: &str,
) -> Result<Vec<Project>, EditError> {
    map_project(projects, id, |p| {
        let mut p = p.clone();
        p.detail_images.push(image.to_string());
        Ok(p)
    })
}

/// Delete the detail image at `index`; later images shift down by one.
pub fn remove_detail_image(
    projects: &[Project],
    id: &str,
    index: usize,
) -> Result<Vec<Project>, EditError> {
    map_project(projects, id, |p| {
        check_index(p, index)?;
        let mut p = p.clone();
        p.detail_images.remove(index);
        Ok(p)
    })
}

/// Check that `id` exists and has a detail image at `index`, without
/// producing a new list.
pub fn check_image_index(projects: &[Project], id: &str, index: usize) -> Result<(), EditError> {
    let project = projects
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| EditError::NotFound(id.to_string()))?;
    check_index(project, index)
}
