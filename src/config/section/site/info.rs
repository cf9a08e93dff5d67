//! `[site.info]` configuration.
//!
//! Basic site information used by feed generation, the sitemap and the
//! JSON api (title, author, description, base url, ...).

use crate::config::FieldPath;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Site metadata for feed generation and api responses.
/// Custom fields go in `[site.info.extra]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Author email.
    pub email: String,

    /// Site description.
    pub description: String,

    /// Site base URL (e.g., "https://example.com").
    pub url: Option<String>,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,

    /// Copyright notice.
    pub copyright: String,

    /// Custom fields, passed through untouched.
    #[serde(default)]
    pub extra: FxHashMap<String, toml::Value>,
}

/// Field paths for diagnostics.
pub struct SiteInfoFields {
    pub title: FieldPath,
    pub author: FieldPath,
    pub email: FieldPath,
    pub description: FieldPath,
    pub url: FieldPath,
    pub language: FieldPath,
    pub copyright: FieldPath,
}

impl SiteInfoConfig {
    pub const FIELDS: SiteInfoFields = SiteInfoFields {
        title: FieldPath::new("site.info.title"),
        author: FieldPath::new("site.info.author"),
        email: FieldPath::new("site.info.email"),
        description: FieldPath::new("site.info.description"),
        url: FieldPath::new("site.info.url"),
        language: FieldPath::new("site.info.language"),
        copyright: FieldPath::new("site.info.copyright"),
    };
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
            copyright: String::new(),
            extra: FxHashMap::default(),
        }
    }
}

impl SiteInfoConfig {
    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `needs_url` (feeds or sitemap enabled), `url` must be set
    /// - `url` must be a valid URL with scheme (e.g., `https://example.com`)
    pub fn validate(&self, needs_url: bool, diag: &mut crate::config::ConfigDiagnostics) {
        // Feeds and the sitemap build absolute links, so they require url
        if needs_url && self.url.is_none() {
            diag.error_with_hint(
                Self::FIELDS.url,
                format!(
                    "feeds or the sitemap are enabled but {} is not configured",
                    Self::FIELDS.url
                ),
                format!("set {}, e.g.: \"https://example.com\"", Self::FIELDS.url),
            );
        }

        // URL format check using url crate for strict validation
        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    // Must be http or https
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    // Must have a valid host
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!("invalid URL: {}", e),
                        "use format like https://example.com",
                    );
                }
            }
        }
    }

    /// Base URL without a trailing slash, for link construction.
    ///
    /// Returns an empty string when `url` is unset (feeds are then disabled
    /// by validation, so links are only built with a real base).
    pub fn base_url(&self) -> String {
        self.url
            .as_deref()
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_default()
    }
}
