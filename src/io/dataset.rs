use crate::model::profile::Profile;
use crate::model::project::Project;

const BUNDLED_PROJECTS: &str = include_str!("../../assets/projects.json");
const BUNDLED_PROFILE: &str = include_str!("../../assets/profile.toml");

/// Commented config template written by `folio init`.
pub const CONFIG_TEMPLATE: &str = include_str!("../../assets/folio.toml");

/// Parse the bundled project dataset.
pub fn try_bundled_projects() -> Result<Vec<Project>, serde_json::Error> {
    serde_json::from_str(BUNDLED_PROJECTS)
}

/// The shipped project list, in display order. This is the source of truth
/// for a factory reset.
pub fn bundled_projects() -> Vec<Project> {
    try_bundled_projects().unwrap_or_else(|e| {
        tracing::error!("bundled dataset is invalid: {}", e);
        Vec::new()
    })
}

pub fn bundled_profile() -> Profile {
    toml::from_str(BUNDLED_PROFILE).unwrap_or_else(|e| {
        tracing::error!("bundled profile is invalid: {}", e);
        Profile::default()
    })
}
