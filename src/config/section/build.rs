//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public"           # Output directory for feeds and sitemap
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory for generated documents.
    pub output: PathBuf,
}

/// Field paths for diagnostics.
pub struct BuildFields {
    pub output: FieldPath,
}

impl BuildConfig {
    pub const FIELDS: BuildFields = BuildFields {
        output: FieldPath::new("build.output"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error(Self::FIELDS.output, "output directory must not be empty");
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "public".into(),
        }
    }
}
