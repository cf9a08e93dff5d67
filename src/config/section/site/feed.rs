//! Feed generation configuration.
//!
//! All three formats (RSS 2.0, Atom 1.0, JSON Feed 1.1) are generated from
//! the same document list; each has its own output filename.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Enable feed generation.
    pub enable: bool,
    /// Output filename for the RSS 2.0 feed.
    pub rss_path: PathBuf,
    /// Output filename for the Atom 1.0 feed.
    pub atom_path: PathBuf,
    /// Output filename for the JSON Feed.
    pub json_path: PathBuf,
}

/// Field paths for diagnostics.
pub struct FeedFields {
    pub enable: FieldPath,
    pub rss_path: FieldPath,
    pub atom_path: FieldPath,
    pub json_path: FieldPath,
}

impl FeedConfig {
    pub const FIELDS: FeedFields = FeedFields {
        enable: FieldPath::new("site.feed.enable"),
        rss_path: FieldPath::new("site.feed.rss_path"),
        atom_path: FieldPath::new("site.feed.atom_path"),
        json_path: FieldPath::new("site.feed.json_path"),
    };

    /// Validate feed output paths.
    ///
    /// Paths are joined onto the output directory at write time, so they
    /// must be relative filenames.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        for (field, path) in [
            (Self::FIELDS.rss_path, &self.rss_path),
            (Self::FIELDS.atom_path, &self.atom_path),
            (Self::FIELDS.json_path, &self.json_path),
        ] {
            validate_relative(field, path, diag);
        }
    }
}

pub(crate) fn validate_relative(field: FieldPath, path: &Path, diag: &mut ConfigDiagnostics) {
    if path.as_os_str().is_empty() {
        diag.error(field, "path must not be empty");
    } else if path.is_absolute() {
        diag.error_with_hint(
            field,
            format!("path must be relative, got '{}'", path.display()),
            "paths are resolved against the output directory",
        );
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            rss_path: "rss.xml".into(),
            atom_path: "atom.xml".into(),
            json_path: "feed.json".into(),
        }
    }
}
