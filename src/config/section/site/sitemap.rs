//! Sitemap generation configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::feed::validate_relative;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation
    pub enable: bool,
    /// Output filename for the sitemap
    pub path: PathBuf,
}

/// Field paths for diagnostics.
pub struct SitemapFields {
    pub enable: FieldPath,
    pub path: FieldPath,
}

impl SitemapConfig {
    pub const FIELDS: SitemapFields = SitemapFields {
        enable: FieldPath::new("site.sitemap.enable"),
        path: FieldPath::new("site.sitemap.path"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.enable {
            validate_relative(Self::FIELDS.path, &self.path, diag);
        }
    }
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.site.sitemap.enable);
        assert_eq!(config.site.sitemap.path, PathBuf::from("sitemap.xml"));
    }

    #[test]
    fn test_disable() {
        let config = test_parse_config("[site.sitemap]\nenable = false");
        assert!(!config.site.sitemap.enable);
    }
}
