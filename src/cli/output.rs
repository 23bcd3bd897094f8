use serde::Serialize;

use crate::io::image::{fallback_sequence, resolve_image_url};
use crate::io::recovery::RecoveryEntry;
use crate::model::config::ImageConfig;
use crate::model::project::{Category, Project};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectSummaryJson {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub year: String,
    pub images: usize,
}

#[derive(Serialize)]
pub struct ResolvedUrlJson {
    pub reference: String,
    pub url: String,
    pub fallbacks: Vec<String>,
}

#[derive(Serialize)]
pub struct RecoveryEntryJson {
    pub timestamp: String,
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<(String, String)>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn project_summary(project: &Project) -> ProjectSummaryJson {
    ProjectSummaryJson {
        id: project.id.clone(),
        category: project.category,
        title: project.title.clone(),
        year: project.year.clone(),
        images: project.detail_images.len(),
    }
}

pub fn resolved_url(reference: &str, cfg: &ImageConfig) -> ResolvedUrlJson {
    let url = resolve_image_url(reference, cfg);
    let fallbacks = fallback_sequence(&url, cfg.max_retries);
    ResolvedUrlJson {
        reference: reference.to_string(),
        url,
        fallbacks,
    }
}

pub fn recovery_entry_json(entry: &RecoveryEntry) -> RecoveryEntryJson {
    RecoveryEntryJson {
        timestamp: entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        category: entry.category.to_string(),
        description: entry.description.clone(),
        fields: entry.fields.clone(),
        body: entry.body.clone(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One row of `folio list`: id, category, year, image count, title.
pub fn format_project_line(project: &Project, id_width: usize) -> String {
    format!(
        "{:<id_width$}  {:<12}  {:<4}  {:>3} img  {}",
        project.id,
        project.category.label(),
        project.year,
        project.detail_images.len(),
        project.title,
    )
}

pub fn format_project_list(projects: &[&Project]) -> Vec<String> {
    let id_width = projects.iter().map(|p| p.id.len()).max().unwrap_or(0);
    projects
        .iter()
        .map(|p| format_project_line(p, id_width))
        .collect()
}

/// Full record for `folio show`. Inline images print as their size only.
pub fn format_project_detail(project: &Project) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", project.title, project.id),
        format!("category: {}", project.category),
        format!("year: {}", project.year),
    ];
    if !project.subtitle.is_empty() {
        lines.push(format!("client: {}", project.subtitle));
    }
    if !project.role.is_empty() {
        lines.push(format!("role: {}", project.role));
    }
    if !project.tags.is_empty() {
        lines.push(format!("tags: {}", project.tags.join(", ")));
    }
    if !project.description.is_empty() {
        lines.push("brief:".to_string());
        for line in project.description.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines.push(format!("cover: {}", short_reference(&project.cover_image)));
    if !project.detail_images.is_empty() {
        lines.push(format!("images ({}):", project.detail_images.len()));
        for (i, image) in project.detail_images.iter().enumerate() {
            lines.push(format!("  {:>2}. {}", i + 1, short_reference(image)));
        }
    }
    lines
}

fn short_reference(reference: &str) -> String {
    match reference.strip_prefix("data:") {
        Some(rest) => {
            let mime = rest.split(';').next().unwrap_or("");
            format!("<inline {}, {} chars>", mime, reference.len())
        }
        None => reference.to_string(),
    }
}

pub fn format_resolved_url(resolved: &ResolvedUrlJson) -> Vec<String> {
    let mut lines = vec![resolved.url.clone()];
    for url in &resolved.fallbacks {
        lines.push(format!("  fallback: {}", url));
    }
    lines
}

pub fn format_recovery_entry(entry: &RecoveryEntry) -> Vec<String> {
    let mut lines = vec![format!(
        "{} [{}] {}",
        entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        entry.category,
        entry.description
    )];
    for (key, value) in &entry.fields {
        lines.push(format!("  {}: {}", key, value));
    }
    if !entry.body.is_empty() {
        for line in entry.body.lines() {
            lines.push(format!("    {}", line));
        }
    }
    lines
}
