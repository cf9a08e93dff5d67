//! Portfolio projects built from `[[projects]]` config entries.

use serde::Serialize;

use crate::config::{ProjectEntry, SiteConfig};
use crate::utils::date::{self, DateTimeUtc};
use crate::utils::slug::slugify;

/// A project with its derived identifier.
///
/// The `id` is the slugified title, so it is stable across restarts and
/// unique as long as titles are (config validation enforces that).
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTimeUtc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&ProjectEntry> for Project {
    fn from(entry: &ProjectEntry) -> Self {
        Self {
            id: slugify(&entry.title),
            title: entry.title.clone(),
            description: entry.description.clone(),
            skills: entry.skills.clone(),
            github_url: entry.github_url.clone(),
            demo_url: entry.demo_url.clone(),
            featured: entry.featured,
            date: entry.date,
            image: entry.image.clone(),
        }
    }
}

/// Projects in newest-first order.
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::from_entries(&config.projects)
    }

    pub fn from_entries(entries: &[ProjectEntry]) -> Self {
        let mut projects: Vec<Project> = entries.iter().map(Project::from).collect();
        projects.sort_by(|a, b| date::newest_first(a.date, b.date).then_with(|| a.id.cmp(&b.id)));
        Self { projects }
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn featured(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}
