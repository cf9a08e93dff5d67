//! RSS 2.0 feed rendering.

use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

use super::FeedEntry;
use crate::config::SiteConfig;
use crate::content::Document;
use crate::utils::date::DateTimeUtc;

/// Render the RSS 2.0 feed.
pub fn render(config: &SiteConfig, docs: &[Document]) -> Result<String> {
    let items: Vec<_> = super::feed_entries(config, docs)
        .iter()
        .map(|entry| entry_to_rss_item(entry, config))
        .collect();

    let channel = ChannelBuilder::default()
        .title(&config.site.info.title)
        .link(config.site.info.base_url())
        .description(&config.site.info.description)
        .language(Some(config.site.info.language.clone()))
        .generator(Some("folio".to_string()))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn entry_to_rss_item(entry: &FeedEntry, config: &SiteConfig) -> rss::Item {
    // pubDate is optional in RSS 2.0; undated documents just omit it.
    let pub_date = entry.date.map(|d| d.to_rfc2822());

    let categories: Vec<_> = entry
        .tags
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.clone()).build())
        .collect();

    ItemBuilder::default()
        .title(Some(entry.title.clone()))
        .link(Some(entry.url.clone()))
        .guid(Some(
            GuidBuilder::default()
                .permalink(true)
                .value(entry.url.clone())
                .build(),
        ))
        .description(entry.excerpt.clone())
        .pub_date(pub_date)
        .author(site_rss_author(config))
        .categories(categories)
        .build()
}

/// Site author in RSS format: "email (Name)".
fn site_rss_author(config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    let author = &config.site.info.author;
    let email = &config.site.info.email;

    // Already in RSS form.
    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.clone());
    }

    if email.is_empty() || author.is_empty() {
        return None;
    }

    Some(format!("{email} ({author})"))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{make_config, make_docs};
    use super::*;

    #[test]
    fn test_site_rss_author_combined() {
        let config = make_config();
        assert_eq!(
            site_rss_author(&config),
            Some("test@example.com (Test Author)".to_string())
        );
    }

    #[test]
    fn test_site_rss_author_already_valid() {
        let mut config = make_config();
        config.site.info.author = "me@example.com (Me)".to_string();
        assert_eq!(
            site_rss_author(&config),
            Some("me@example.com (Me)".to_string())
        );
    }

    #[test]
    fn test_site_rss_author_missing_parts() {
        let mut config = make_config();
        config.site.info.email = String::new();
        assert_eq!(site_rss_author(&config), None);
    }

    #[test]
    fn test_entry_to_rss_item() {
        let config = make_config();
        let entry = FeedEntry {
            title: "Test Post".to_string(),
            url: "https://example.com/blog/test".to_string(),
            date: DateTimeUtc::parse("2024-01-15"),
            excerpt: Some("A summary".to_string()),
            tags: vec!["intro".to_string(), "rust".to_string()],
        };

        let item = entry_to_rss_item(&entry, &config);
        assert_eq!(item.title(), Some("Test Post"));
        assert_eq!(item.link(), Some("https://example.com/blog/test"));
        assert_eq!(item.description(), Some("A summary"));
        assert!(item.pub_date().unwrap().contains("Jan 2024"));
        assert!(item.guid().unwrap().is_permalink());

        let names: Vec<_> = item.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["intro", "rust"]);
    }

    #[test]
    fn test_undated_entry_has_no_pub_date() {
        let config = make_config();
        let entry = FeedEntry {
            title: "Undated".to_string(),
            url: "https://example.com/blog/undated".to_string(),
            date: None,
            excerpt: None,
            tags: Vec::new(),
        };

        let item = entry_to_rss_item(&entry, &config);
        assert_eq!(item.pub_date(), None);
    }

    #[test]
    fn test_render_includes_every_document_once() {
        let config = make_config();
        let docs = make_docs();
        let xml = render(&config, &docs).unwrap();

        for doc in &docs {
            let link = format!("https://example.com/blog/{}", doc.slug);
            assert_eq!(xml.matches(&link).count(), 2, "link + guid for {}", doc.slug);
        }
        assert_eq!(xml.matches("<item>").count(), docs.len());
        assert!(xml.contains("<language>en</language>"));
        assert!(xml.contains("<category>rust</category>"));
    }
}
