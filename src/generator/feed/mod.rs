//! Feed generation (RSS 2.0, Atom 1.0, JSON Feed 1.1).
//!
//! All three formats render from the same document list and agree on one
//! rule: every document appears exactly once, dated or not. An undated
//! document simply carries no timestamp in formats where the field is
//! optional (RSS `pubDate`, JSON Feed `date_published`); Atom requires
//! `updated`, so the Unix epoch stands in as an explicit "unknown" marker
//! rather than stamping documents with the render time.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::content::Document;
use crate::log;
use crate::utils::date::DateTimeUtc;
use crate::utils::mime;

pub mod atom;
pub mod json;
pub mod rss;

/// A feed format folio can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Rss,
    Atom,
    Json,
}

impl FeedFormat {
    /// Resolve a requested feed name against the configured output paths.
    ///
    /// With default config this accepts `rss.xml`, `atom.xml` and
    /// `feed.json`; custom paths in `[site.feed]` move the served names
    /// along with the written files.
    pub fn from_request_name(name: &str, config: &SiteConfig) -> Option<Self> {
        let name = Path::new(name.trim_start_matches('/'));
        let feed = &config.site.feed;
        if name == feed.rss_path {
            Some(Self::Rss)
        } else if name == feed.atom_path {
            Some(Self::Atom)
        } else if name == feed.json_path {
            Some(Self::Json)
        } else {
            None
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Rss => mime::types::RSS,
            Self::Atom => mime::types::ATOM,
            Self::Json => mime::types::JSON,
        }
    }

    /// Render this format from the given documents.
    pub fn render(self, config: &SiteConfig, docs: &[Document]) -> Result<String> {
        match self {
            Self::Rss => rss::render(config, docs),
            Self::Atom => atom::render(config, docs),
            Self::Json => json::render(config, docs),
        }
    }
}

/// A document projected into feed-item form.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub url: String,
    pub date: Option<DateTimeUtc>,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
}

impl FeedEntry {
    fn from_document(doc: &Document, base_url: &str) -> Self {
        Self {
            title: doc.title.clone(),
            url: note_url(base_url, &doc.slug),
            date: doc.date,
            excerpt: (!doc.excerpt.is_empty()).then(|| doc.excerpt.clone()),
            tags: doc.tags.clone(),
        }
    }
}

/// Project every document into a feed entry.
pub fn feed_entries(config: &SiteConfig, docs: &[Document]) -> Vec<FeedEntry> {
    let base_url = config.site.info.base_url();
    docs.iter()
        .map(|doc| FeedEntry::from_document(doc, &base_url))
        .collect()
}

/// Canonical public URL of a note.
pub fn note_url(base_url: &str, slug: &str) -> String {
    format!("{base_url}/blog/{slug}")
}

/// Most recent document date, or the epoch when nothing is dated.
pub fn latest_updated(docs: &[Document]) -> DateTimeUtc {
    docs.iter()
        .filter_map(|d| d.date)
        .max()
        .unwrap_or(DateTimeUtc::UNIX_EPOCH)
}

/// Write every enabled feed file into the output directory.
pub fn write_feeds(config: &SiteConfig, docs: &[Document]) -> Result<()> {
    if !config.site.feed.enable {
        return Ok(());
    }

    let output_dir = &config.build.output;
    for (format, path) in [
        (FeedFormat::Rss, &config.site.feed.rss_path),
        (FeedFormat::Atom, &config.site.feed.atom_path),
        (FeedFormat::Json, &config.site.feed.json_path),
    ] {
        let body = format.render(config, docs)?;
        let out_path = output_dir.join(path);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, &body)
            .with_context(|| format!("failed to write feed to {}", out_path.display()))?;

        log!("feed"; "{}", out_path.file_name().unwrap_or_default().to_string_lossy());
    }

    Ok(())
}
