//! `folio query`: dump document metadata as JSON.
//!
//! Queries all documents, or only the named slugs (in the order given).
//! Output goes to stdout or a file, one JSON array per run.

use std::fs;
use std::io::Write;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::cli::args::QueryArgs;
use crate::config::SiteConfig;
use crate::content::{Document, NoteStore};
use crate::log;
use crate::utils::date::DateTimeUtc;
use crate::utils::plural::plural_count;

/// Execute query command
pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let store = NoteStore::from_config(config);

    let docs = if args.slugs.is_empty() {
        store.load_all()?
    } else {
        args.slugs
            .iter()
            .map(|slug| store.load_slug(slug))
            .collect::<Result<Vec<_>, _>>()?
    };

    log!("query"; "found {}", plural_count(docs.len(), "document"));

    let output = render_documents(&docs, args);
    let formatted = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    // Output to file or stdout
    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)?;
        writeln!(file, "{}", formatted)?;
        log!("query"; "wrote output to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

fn render_documents(docs: &[Document], args: &QueryArgs) -> Value {
    Value::Array(docs.iter().map(|doc| render_document(doc, args)).collect())
}

/// One document's metadata, with field filtering and date humanization.
fn render_document(doc: &Document, args: &QueryArgs) -> Value {
    let Ok(Value::Object(mut meta)) = serde_json::to_value(doc) else {
        return Value::Null;
    };

    if args.human
        && let Some(date) = doc.date
    {
        let human = format!(
            "{} ({})",
            date.to_long_date(),
            date.relative_to(DateTimeUtc::now())
        );
        meta.insert("date".to_string(), Value::String(human));
    }

    let Some(ref fields) = args.fields else {
        return Value::Object(meta);
    };

    // The slug stays in filtered output so entries remain identifiable
    let mut obj = Map::new();
    obj.insert(
        "slug".to_string(),
        meta.get("slug").cloned().unwrap_or_default(),
    );
    for field in fields {
        if field == "slug" {
            continue;
        }
        // Requested but absent fields show as null
        obj.insert(
            field.clone(),
            meta.get(field).cloned().unwrap_or(Value::Null),
        );
    }
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> Document {
        Document {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            date: DateTimeUtc::parse("2024-06-15"),
            excerpt: "A note".to_string(),
            tags: vec!["rust".to_string()],
            image: None,
            content: "body".to_string(),
        }
    }

    fn query_args() -> QueryArgs {
        QueryArgs {
            slugs: Vec::new(),
            pretty: false,
            human: false,
            fields: None,
            output: None,
        }
    }

    #[test]
    fn test_render_full_metadata() {
        let value = render_document(&sample_doc(), &query_args());
        assert_eq!(value["slug"], "hello");
        assert_eq!(value["date"], "2024-06-15");
        // Body is not part of query output
        assert!(value.get("content").is_none());
    }

    #[test]
    fn test_render_filtered_fields() {
        let mut args = query_args();
        args.fields = Some(vec!["title".to_string(), "missing".to_string()]);

        let value = render_document(&sample_doc(), &args);
        assert_eq!(value["slug"], "hello");
        assert_eq!(value["title"], "Hello");
        assert_eq!(value["missing"], Value::Null);
        assert!(value.get("excerpt").is_none());
    }

    #[test]
    fn test_render_human_dates() {
        let mut args = query_args();
        args.human = true;

        let value = render_document(&sample_doc(), &args);
        let date = value["date"].as_str().unwrap();
        assert!(date.starts_with("June 15, 2024 ("));
        assert!(date.ends_with("ago)") || date.ends_with("(today)"));
    }

    #[test]
    fn test_render_human_keeps_undated() {
        let mut args = query_args();
        args.human = true;

        let mut doc = sample_doc();
        doc.date = None;
        let value = render_document(&doc, &args);
        assert!(value.get("date").is_none());
    }
}
