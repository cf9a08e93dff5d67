//! Sitemap generation.
//!
//! Lists the site's section pages and every note for search engine
//! indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/notes/hello</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use std::borrow::Cow;
use std::fs;

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::content::Document;
use crate::log;
use crate::utils::date::DateTimeUtc;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Top-level site sections, always present.
const SECTION_ROUTES: [&str; 4] = ["", "notes", "projects", "photos"];

/// Render the sitemap XML.
pub fn render(config: &SiteConfig, docs: &[Document]) -> String {
    Sitemap::build(config, docs).into_xml()
}

/// Write the sitemap into the output directory if enabled.
pub fn write_sitemap(config: &SiteConfig, docs: &[Document]) -> Result<()> {
    if !config.site.sitemap.enable {
        return Ok(());
    }

    let path = config.build.output.join(&config.site.sitemap.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let xml = render(config, docs);
    fs::write(&path, &xml)
        .with_context(|| format!("failed to write sitemap to {}", path.display()))?;

    log!("sitemap"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl Sitemap {
    fn build(config: &SiteConfig, docs: &[Document]) -> Self {
        let base_url = config.site.info.base_url();

        let mut urls: Vec<UrlEntry> = SECTION_ROUTES
            .iter()
            .map(|route| UrlEntry {
                loc: if route.is_empty() {
                    format!("{base_url}/")
                } else {
                    format!("{base_url}/{route}")
                },
                lastmod: None,
            })
            .collect();

        urls.extend(docs.iter().map(|doc| UrlEntry {
            loc: format!("{base_url}/notes/{}", doc.slug),
            lastmod: doc.date.map(lastmod),
        }));

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// W3C datetime for `<lastmod>`: date-only unless a time was given.
fn lastmod(date: DateTimeUtc) -> String {
    if date.has_time() {
        date.to_rfc3339()
    } else {
        date.to_ymd()
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
