use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed set of portfolio categories.
///
/// `VisualLegacy` is the older localized label some records still carry; it
/// is kept so persisted data from earlier datasets keeps loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "WEB")]
    Web,
    #[serde(rename = "VISUAL")]
    Visual,
    #[serde(rename = "PRACTICE")]
    Practice,
    #[serde(rename = "ILLUSTRATION")]
    Illustration,
    #[serde(rename = "视觉设计")]
    VisualLegacy,
}

impl Category {
    /// Categories offered by the portfolio filter, in display order.
    pub const FILTERABLE: [Category; 5] = [
        Category::UiUx,
        Category::Web,
        Category::Visual,
        Category::Practice,
        Category::Illustration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::UiUx => "UI/UX",
            Category::Web => "WEB",
            Category::Visual => "VISUAL",
            Category::Practice => "PRACTICE",
            Category::Illustration => "ILLUSTRATION",
            Category::VisualLegacy => "视觉设计",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "UI/UX" | "UIUX" | "UI" => Ok(Category::UiUx),
            "WEB" => Ok(Category::Web),
            "VISUAL" => Ok(Category::Visual),
            "PRACTICE" => Ok(Category::Practice),
            "ILLUSTRATION" => Ok(Category::Illustration),
            "视觉设计" => Ok(Category::VisualLegacy),
            _ => Err(format!("unknown category: {}", s)),
        }
    }
}

/// One portfolio entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub category: Category,
    pub title: String,
    /// Shown as "Client"
    pub subtitle: String,
    /// Shown as "Brief"
    pub description: String,
    /// Shown as "Scope"
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub role: String,
    pub cover_image: String,
    #[serde(default)]
    pub detail_images: Vec<String>,
    pub year: String,
}

/// Text fields that can be edited by name. `id` is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Title,
    Subtitle,
    Description,
    Role,
    Year,
    Category,
    Tags,
}

impl ProjectField {
    pub const ALL: [ProjectField; 7] = [
        ProjectField::Title,
        ProjectField::Subtitle,
        ProjectField::Description,
        ProjectField::Role,
        ProjectField::Year,
        ProjectField::Category,
        ProjectField::Tags,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProjectField::Title => "title",
            ProjectField::Subtitle => "subtitle",
            ProjectField::Description => "description",
            ProjectField::Role => "role",
            ProjectField::Year => "year",
            ProjectField::Category => "category",
            ProjectField::Tags => "tags",
        }
    }

    /// Current value of this field on `project`, as an editable string.
    pub fn value_of(self, project: &Project) -> String {
        match self {
            ProjectField::Title => project.title.clone(),
            ProjectField::Subtitle => project.subtitle.clone(),
            ProjectField::Description => project.description.clone(),
            ProjectField::Role => project.role.clone(),
            ProjectField::Year => project.year.clone(),
            ProjectField::Category => project.category.label().to_string(),
            ProjectField::Tags => project.tags.join(", "),
        }
    }
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectField::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// Split a comma-separated tag string into trimmed, non-empty tags.
pub fn parse_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serde_uses_display_labels() {
        let json = serde_json::to_string(&Category::UiUx).unwrap();
        assert_eq!(json, "\"UI/UX\"");
        let legacy: Category = serde_json::from_str("\"视觉设计\"").unwrap();
        assert_eq!(legacy, Category::VisualLegacy);
    }

    #[test]
    fn category_from_str_is_case_insensitive() {
        assert_eq!("web".parse::<Category>(), Ok(Category::Web));
        assert_eq!("ui/ux".parse::<Category>(), Ok(Category::UiUx));
        assert!("sculpture".parse::<Category>().is_err());
    }

    #[test]
    fn project_uses_camel_case_keys() {
        let json = r#"{
            "id": "a", "category": "WEB", "title": "A", "subtitle": "s",
            "description": "d", "tags": ["x"], "role": "r",
            "coverImage": "/c.jpg", "detailImages": ["/1.jpg"], "year": "2025"
        }"#;
        let p: Project = serde_json::from_str(json).unwrap();
        assert_eq!(p.cover_image, "/c.jpg");
        assert_eq!(p.detail_images, vec!["/1.jpg"]);
        let back = serde_json::to_value(&p).unwrap();
        assert!(back.get("coverImage").is_some());
        assert!(back.get("cover_image").is_none());
    }

    #[test]
    fn field_names_round_trip() {
        for field in ProjectField::ALL {
            assert_eq!(field.name().parse::<ProjectField>(), Ok(field));
        }
        assert!("id".parse::<ProjectField>().is_err());
    }

    #[test]
    fn parse_tags_trims_and_drops_empty() {
        assert_eq!(parse_tags(" a, b ,,c "), vec!["a", "b", "c"]);
        assert!(parse_tags("").is_empty());
    }
}
