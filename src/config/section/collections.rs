//! `[[projects]]` and `[[photos]]` collection tables.
//!
//! Static portfolio collections declared directly in the config file.
//! Stable ids are derived from titles / alt texts at load time, so entries
//! carry none themselves.
//!
//! # Example
//!
//! ```toml
//! [[projects]]
//! title = "Portfolio Website"
//! description = "Personal portfolio built with folio."
//! skills = ["Rust", "folio"]
//! github_url = "https://github.com/alice/portfolio"
//! featured = true
//! date = "2024-02-15"
//!
//! [[photos]]
//! src = "/photos/photo1.jpg"
//! alt = "Urban Architecture"
//! category = "Architecture"
//! aspect_ratio = "portrait"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::date::DateTimeUtc;
use crate::utils::slug::slugify;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

pub const PROJECTS_FIELD: FieldPath = FieldPath::new("projects");
pub const PHOTOS_FIELD: FieldPath = FieldPath::new("photos");

/// One `[[projects]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    /// Project title. Also the source of the derived id.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Skill / technology tags.
    pub skills: Vec<String>,
    /// Repository link.
    pub github_url: Option<String>,
    /// Live demo link.
    pub demo_url: Option<String>,
    /// Show in the featured subset.
    pub featured: bool,
    /// Completion date, used for ordering.
    pub date: Option<DateTimeUtc>,
    /// Preview image path.
    pub image: Option<String>,
}

impl Default for ProjectEntry {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            skills: Vec::new(),
            github_url: None,
            demo_url: None,
            featured: false,
            date: None,
            image: None,
        }
    }
}

/// Photo orientation hint for gallery layout.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    Portrait,
    #[default]
    Landscape,
    Square,
}

/// One `[[photos]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoEntry {
    /// Image path or URL.
    pub src: String,
    /// Alt text. Also the source of the derived id.
    pub alt: String,
    /// Orientation hint.
    pub aspect_ratio: AspectRatio,
    /// Gallery category for filtering.
    pub category: Option<String>,
}

impl Default for PhotoEntry {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: String::new(),
            aspect_ratio: AspectRatio::default(),
            category: None,
        }
    }
}

/// Validate `[[projects]]` entries.
///
/// Titles must be non-empty and slugify to unique ids.
pub fn validate_projects(entries: &[ProjectEntry], diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashSet::default();
    for (i, entry) in entries.iter().enumerate() {
        if entry.title.is_empty() {
            diag.error(PROJECTS_FIELD, format!("entry {}: title must not be empty", i + 1));
            continue;
        }
        let id = slugify(&entry.title);
        if id.is_empty() {
            diag.error(
                PROJECTS_FIELD,
                format!("entry {}: title '{}' produces an empty id", i + 1, entry.title),
            );
        } else if !seen.insert(id.clone()) {
            diag.error(
                PROJECTS_FIELD,
                format!("entry {}: duplicate id '{}' (titles must be unique)", i + 1, id),
            );
        }
    }
}

/// Validate `[[photos]]` entries.
///
/// Sources must be set; alt texts must be non-empty and slugify to unique
/// ids.
pub fn validate_photos(entries: &[PhotoEntry], diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashSet::default();
    for (i, entry) in entries.iter().enumerate() {
        if entry.src.is_empty() {
            diag.error(PHOTOS_FIELD, format!("entry {}: src must not be empty", i + 1));
        }
        if entry.alt.is_empty() {
            diag.error(PHOTOS_FIELD, format!("entry {}: alt must not be empty", i + 1));
            continue;
        }
        let id = slugify(&entry.alt);
        if id.is_empty() {
            diag.error(
                PHOTOS_FIELD,
                format!("entry {}: alt '{}' produces an empty id", i + 1, entry.alt),
            );
        } else if !seen.insert(id.clone()) {
            diag.error(
                PHOTOS_FIELD,
                format!("entry {}: duplicate id '{}' (alt texts must be unique)", i + 1, id),
            );
        }
    }
}
