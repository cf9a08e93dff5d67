//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module        | TOML Section                | Purpose                      |
//! |---------------|-----------------------------|------------------------------|
//! | `build`       | `[build]`                   | Output directory             |
//! | `collections` | `[[projects]]`/`[[photos]]` | Static portfolio collections |
//! | `contact`     | `[contact]`                 | Outbound contact mail        |
//! | `content`     | `[content]`                 | Document directory           |
//! | `serve`       | `[serve]`                   | Api server                   |
//! | `site`        | `[site]`                    | Site info, feeds, sitemap    |

mod build;
pub mod collections;
mod contact;
mod content;
mod serve;
pub mod site;

// Re-export section configs
pub use build::BuildConfig;
pub use collections::{AspectRatio, PhotoEntry, ProjectEntry};
pub use contact::ContactConfig;
pub use content::ContentConfig;
pub use serve::ServeConfig;
pub use site::{FeedConfig, SiteInfoConfig, SiteSectionConfig, SitemapConfig};
