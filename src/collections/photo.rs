//! Photo gallery built from `[[photos]]` config entries.

use serde::Serialize;

use crate::config::{AspectRatio, PhotoEntry, SiteConfig};
use crate::utils::slug::slugify;

/// A photo with its derived identifier (the slugified alt text).
#[derive(Debug, Clone, Serialize)]
pub struct Photo {
    pub id: String,
    pub src: String,
    pub alt: String,
    pub aspect_ratio: AspectRatio,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&PhotoEntry> for Photo {
    fn from(entry: &PhotoEntry) -> Self {
        Self {
            id: slugify(&entry.alt),
            src: entry.src.clone(),
            alt: entry.alt.clone(),
            aspect_ratio: entry.aspect_ratio,
            category: entry.category.clone(),
        }
    }
}

/// Photos in config order.
pub struct PhotoStore {
    photos: Vec<Photo>,
}

impl PhotoStore {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::from_entries(&config.photos)
    }

    pub fn from_entries(entries: &[PhotoEntry]) -> Self {
        Self {
            photos: entries.iter().map(Photo::from).collect(),
        }
    }

    pub fn all(&self) -> &[Photo] {
        &self.photos
    }

    pub fn by_id(&self, id: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    /// Case-insensitive alt-text lookup.
    pub fn by_alt(&self, alt: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.alt.eq_ignore_ascii_case(alt))
    }

    /// Case-insensitive category filter.
    pub fn by_category(&self, category: &str) -> Vec<&Photo> {
        self.photos
            .iter()
            .filter(|p| {
                p.category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(category))
            })
            .collect()
    }
}
