//! `[content]` section configuration.
//!
//! Where documents live and which files count as documents.
//!
//! # Example
//!
//! ```toml
//! [content]
//! dir = "content"             # Document directory (relative to site root)
//! extensions = ["md", "mdx"]  # File extensions treated as documents
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Document source directory.
    pub dir: PathBuf,

    /// File extensions (without dot) loaded as documents.
    pub extensions: Vec<String>,
}

/// Field paths for diagnostics.
pub struct ContentFields {
    pub dir: FieldPath,
    pub extensions: FieldPath,
}

impl ContentConfig {
    pub const FIELDS: ContentFields = ContentFields {
        dir: FieldPath::new("content.dir"),
        extensions: FieldPath::new("content.extensions"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extensions.is_empty() {
            diag.error_with_hint(
                Self::FIELDS.extensions,
                "at least one extension is required",
                "e.g.: extensions = [\"md\", \"mdx\"]",
            );
        }
        for ext in &self.extensions {
            if ext.starts_with('.') {
                diag.error_with_hint(
                    Self::FIELDS.extensions,
                    format!("extension '{}' must not start with a dot", ext),
                    format!("use \"{}\"", ext.trim_start_matches('.')),
                );
            }
        }
    }

    /// Check whether a filename extension is a document extension.
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "content".into(),
            extensions: vec!["md".into(), "mdx".into()],
        }
    }
}
