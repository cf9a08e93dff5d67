//! JSON Feed 1.1 rendering.
//!
//! <https://jsonfeed.org/version/1.1>

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Document;

const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

#[derive(Debug, Serialize)]
struct JsonFeed {
    version: &'static str,
    title: String,
    home_page_url: String,
    feed_url: String,
    description: String,
    language: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<JsonAuthor>,
    items: Vec<JsonItem>,
}

#[derive(Debug, Serialize)]
struct JsonAuthor {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonItem {
    id: String,
    url: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    content_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

/// Render the JSON Feed.
pub fn render(config: &SiteConfig, docs: &[Document]) -> Result<String> {
    let base_url = config.site.info.base_url();

    let items = super::feed_entries(config, docs)
        .into_iter()
        .zip(docs)
        .map(|(entry, doc)| JsonItem {
            id: entry.url.clone(),
            url: entry.url,
            title: entry.title,
            summary: entry.excerpt,
            content_html: doc.content_html(),
            date_published: entry.date.map(|d| d.to_rfc3339()),
            tags: entry.tags,
        })
        .collect();

    let feed = JsonFeed {
        version: JSON_FEED_VERSION,
        title: config.site.info.title.clone(),
        home_page_url: format!("{base_url}/"),
        feed_url: format!("{}/{}", base_url, config.site.feed.json_path.display()),
        description: config.site.info.description.clone(),
        language: config.site.info.language.clone(),
        authors: site_authors(config),
        items,
    };

    serde_json::to_string(&feed).context("failed to serialize JSON feed")
}

fn site_authors(config: &SiteConfig) -> Vec<JsonAuthor> {
    let name = config.site.info.author.clone();
    if name.is_empty() {
        return Vec::new();
    }
    vec![JsonAuthor {
        name,
        url: config.site.info.url.clone(),
    }]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{make_config, make_docs};
    use super::*;

    fn rendered() -> serde_json::Value {
        let config = make_config();
        let docs = make_docs();
        serde_json::from_str(&render(&config, &docs).unwrap()).unwrap()
    }

    #[test]
    fn test_top_level_fields() {
        let feed = rendered();
        assert_eq!(feed["version"], JSON_FEED_VERSION);
        assert_eq!(feed["title"], "Test Site");
        assert_eq!(feed["home_page_url"], "https://example.com/");
        assert_eq!(feed["feed_url"], "https://example.com/feed.json");
        assert_eq!(feed["authors"][0]["name"], "Test Author");
    }

    #[test]
    fn test_items_cover_every_document() {
        let feed = rendered();
        let items = feed["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);

        let first = &items[0];
        assert_eq!(first["id"], "https://example.com/blog/newest");
        assert_eq!(first["url"], "https://example.com/blog/newest");
        assert_eq!(first["date_published"], "2024-06-15T00:00:00Z");
        assert_eq!(first["tags"][0], "rust");
        assert!(
            first["content_html"]
                .as_str()
                .unwrap()
                .contains("<h1>Newest</h1>")
        );
    }

    #[test]
    fn test_undated_item_omits_date_published() {
        let feed = rendered();
        let undated = feed["items"]
            .as_array()
            .unwrap()
            .iter()
            .find(|i| i["url"] == "https://example.com/blog/undated")
            .unwrap();
        assert!(undated.get("date_published").is_none());
    }

    #[test]
    fn test_empty_excerpt_omits_summary() {
        let feed = rendered();
        let older = feed["items"]
            .as_array()
            .unwrap()
            .iter()
            .find(|i| i["url"] == "https://example.com/blog/older")
            .unwrap();
        assert!(older.get("summary").is_none());
    }
}
