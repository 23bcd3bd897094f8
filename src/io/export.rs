use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::io::recovery::atomic_write;
use crate::model::project::Project;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not serialize projects: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Default export file name, e.g. `portfolio-export-20250514-093000.json`.
pub fn default_export_name(now: DateTime<Local>) -> String {
    format!("portfolio-export-{}.json", now.format("%Y%m%d-%H%M%S"))
}

/// Serialize the whole list in the dataset format.
pub fn export_json(projects: &[Project]) -> Result<String, ExportError> {
    let mut json = serde_json::to_string_pretty(projects)?;
    json.push('\n');
    Ok(json)
}

/// Write the list to `path`. Returns the number of projects written.
pub fn export_to(projects: &[Project], path: &Path) -> Result<usize, ExportError> {
    let json = export_json(projects)?;
    atomic_write(path, json.as_bytes()).map_err(|e| ExportError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), count = projects.len(), "exported");
    Ok(projects.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dataset::bundled_projects;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn export_is_reloadable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");
        let projects = bundled_projects();
        assert_eq!(export_to(&projects, &path).unwrap(), projects.len());

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<Project> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, projects);
        assert!(text.contains("\"coverImage\""));
    }

    #[test]
    fn export_name_uses_local_time() {
        let t = Local.with_ymd_and_hms(2025, 5, 14, 9, 30, 0).unwrap();
        insta::assert_snapshot!(default_export_name(t), @"portfolio-export-20250514-093000.json");
    }
}
