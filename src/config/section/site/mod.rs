//! `[site]` section configuration.
//!
//! Contains site metadata and site-level generation features.
//!
//! # Example
//!
//! ```toml
//! [site.info]
//! title = "My Notes"
//! description = "A personal portfolio and notes site"
//! author = "Alice"
//! email = "alice@example.com"
//! url = "https://example.com"
//!
//! [site.info.extra]
//! github = "https://github.com/alice"
//!
//! [site.feed]
//! enable = true
//! rss_path = "rss.xml"
//!
//! [site.sitemap]
//! enable = true
//! ```

mod feed;
mod info;
mod sitemap;

pub use feed::FeedConfig;
pub use info::SiteInfoConfig;
pub use sitemap::SitemapConfig;

use serde::{Deserialize, Serialize};

/// Site section configuration containing info and site-level features.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site metadata (title, author, description, etc.)
    pub info: SiteInfoConfig,

    /// Feed generation settings (RSS/Atom/JSON Feed).
    pub feed: FeedConfig,

    /// Sitemap generation settings.
    pub sitemap: SitemapConfig,
}
