//! Atom 1.0 feed rendering.

use anyhow::{Context, Result};
use atom_syndication::{
    Category, CategoryBuilder, Entry, EntryBuilder, Feed, FeedBuilder, FixedDateTime,
    GeneratorBuilder, Link, LinkBuilder, Person, PersonBuilder, Text,
};

use super::FeedEntry;
use crate::config::SiteConfig;
use crate::content::Document;
use crate::utils::date::DateTimeUtc;

/// Render the Atom 1.0 feed.
pub fn render(config: &SiteConfig, docs: &[Document]) -> Result<String> {
    let base_url = config.site.info.base_url();

    let entries: Vec<Entry> = super::feed_entries(config, docs)
        .iter()
        .map(|entry| entry_to_atom_entry(entry))
        .collect::<Result<_>>()?;

    let updated = to_fixed_datetime(super::latest_updated(docs))?;

    let author: Person = PersonBuilder::default()
        .name(config.site.info.author.clone())
        .email(Some(config.site.info.email.clone()))
        .build();

    let self_link: Link = LinkBuilder::default()
        .href(format!(
            "{}/{}",
            base_url,
            config.site.feed.atom_path.display()
        ))
        .rel("self".to_string())
        .mime_type(Some("application/atom+xml".to_string()))
        .build();

    let alternate_link: Link = LinkBuilder::default()
        .href(base_url.clone())
        .rel("alternate".to_string())
        .build();

    let feed: Feed = FeedBuilder::default()
        .title(Text::plain(config.site.info.title.clone()))
        .id(base_url)
        .updated(updated)
        .authors(vec![author])
        .links(vec![self_link, alternate_link])
        .subtitle(Some(Text::plain(config.site.info.description.clone())))
        .generator(Some(GeneratorBuilder::default().value("folio").build()))
        .lang(Some(config.site.info.language.clone()))
        .entries(entries)
        .build();

    Ok(feed.to_string())
}

fn entry_to_atom_entry(entry: &FeedEntry) -> Result<Entry> {
    // Atom requires `updated`; undated documents get the epoch marker.
    let updated = to_fixed_datetime(entry.date.unwrap_or(DateTimeUtc::UNIX_EPOCH))?;

    let entry_link: Link = LinkBuilder::default()
        .href(entry.url.clone())
        .rel("alternate".to_string())
        .build();

    let categories: Vec<Category> = entry
        .tags
        .iter()
        .map(|tag| CategoryBuilder::default().term(tag.clone()).build())
        .collect();

    Ok(EntryBuilder::default()
        .title(Text::plain(entry.title.clone()))
        .id(entry.url.clone())
        .updated(updated)
        .links(vec![entry_link])
        .categories(categories)
        .summary(entry.excerpt.clone().map(Text::plain))
        .build())
}

fn to_fixed_datetime(date: DateTimeUtc) -> Result<FixedDateTime> {
    let rfc3339 = date.to_rfc3339();
    rfc3339
        .parse()
        .with_context(|| format!("invalid feed timestamp {rfc3339:?}"))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{make_config, make_docs};
    use super::*;

    fn entry(date: Option<&str>) -> FeedEntry {
        FeedEntry {
            title: "Test Post".to_string(),
            url: "https://example.com/blog/test".to_string(),
            date: date.and_then(DateTimeUtc::parse),
            excerpt: Some("A summary".to_string()),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_entry_basic() {
        let atom = entry_to_atom_entry(&entry(Some("2024-01-15"))).unwrap();
        assert_eq!(atom.title().as_str(), "Test Post");
        assert_eq!(atom.id(), "https://example.com/blog/test");
        assert!(atom.updated().to_rfc3339().starts_with("2024-01-15"));
    }

    #[test]
    fn test_entry_tags_become_categories() {
        let mut tagged = entry(Some("2024-01-15"));
        tagged.tags = vec!["intro".to_string(), "rust".to_string()];

        let atom = entry_to_atom_entry(&tagged).unwrap();
        let terms: Vec<_> = atom.categories().iter().map(|c| c.term()).collect();
        assert_eq!(terms, vec!["intro", "rust"]);
    }

    #[test]
    fn test_undated_entry_uses_epoch() {
        let atom = entry_to_atom_entry(&entry(None)).unwrap();
        assert!(atom.updated().to_rfc3339().starts_with("1970-01-01"));
    }

    #[test]
    fn test_render_includes_every_document_once() {
        let config = make_config();
        let docs = make_docs();
        let xml = render(&config, &docs).unwrap();

        assert_eq!(xml.matches("<entry>").count(), docs.len());
        assert!(xml.contains("https://example.com/blog/undated"));
        assert!(xml.contains("<name>Test Author</name>"));
        assert!(xml.contains("term=\"rust\""));
    }

    #[test]
    fn test_feed_updated_is_latest_document_date() {
        let config = make_config();
        let docs = make_docs();
        let xml = render(&config, &docs).unwrap();

        assert!(xml.contains("2024-06-15"));
    }

    #[test]
    fn test_self_link_follows_config() {
        let mut config = make_config();
        config.site.feed.atom_path = "feeds/atom.xml".into();
        let xml = render(&config, &make_docs()).unwrap();

        assert!(xml.contains("https://example.com/feeds/atom.xml"));
    }
}
