use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::project::{Category, Project};

/// Portfolio list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// All filter options, in the order the portfolio screen cycles them.
    pub fn options() -> Vec<CategoryFilter> {
        let mut out = vec![CategoryFilter::All];
        out.extend(Category::FILTERABLE.into_iter().map(CategoryFilter::Only));
        out
    }

    /// Next option in cycle order, wrapping back to `All`.
    pub fn next(self) -> CategoryFilter {
        let options = Self::options();
        let pos = options.iter().position(|o| *o == self).unwrap_or(0);
        options[(pos + 1) % options.len()]
    }

    pub fn matches(self, project: &Project) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => project.category == c,
        }
    }

    pub fn parse(s: &str) -> Result<CategoryFilter, String> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("ALL"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

/// Projects matching `filter`, in list order.
pub fn filter_projects(projects: &[Project], filter: CategoryFilter) -> Vec<&Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

pub fn find_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == id)
}

/// The project after `id` in list order, wrapping to the first.
pub fn next_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    if projects.is_empty() {
        return None;
    }
    let next = match projects.iter().position(|p| p.id == id) {
        Some(pos) => (pos + 1) % projects.len(),
        None => 0,
    };
    projects.get(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dataset::bundled_projects;

    #[test]
    fn filter_preserves_order() {
        let projects = bundled_projects();
        let web = filter_projects(&projects, CategoryFilter::Only(Category::Web));
        let ids: Vec<&str> = web.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["clackyai-web", "showmebug-web"]);
        assert_eq!(
            filter_projects(&projects, CategoryFilter::All).len(),
            projects.len()
        );
    }

    #[test]
    fn filter_cycle_wraps() {
        let mut f = CategoryFilter::All;
        for _ in 0..CategoryFilter::options().len() {
            f = f.next();
        }
        assert_eq!(f, CategoryFilter::All);
        assert_eq!(
            CategoryFilter::All.next(),
            CategoryFilter::Only(Category::UiUx)
        );
    }

    #[test]
    fn parse_filter() {
        assert_eq!(CategoryFilter::parse("ALL"), Ok(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("practice"),
            Ok(CategoryFilter::Only(Category::Practice))
        );
        assert!(CategoryFilter::parse("misc").is_err());
    }

    #[test]
    fn next_project_wraps() {
        let projects = bundled_projects();
        let last = projects.last().unwrap();
        assert_eq!(
            next_project(&projects, &last.id).map(|p| p.id.as_str()),
            Some(projects[0].id.as_str())
        );
        assert_eq!(
            next_project(&projects, &projects[0].id).map(|p| p.id.as_str()),
            Some(projects[1].id.as_str())
        );
        assert!(next_project(&[], "x").is_none());
    }
}
