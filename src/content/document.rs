//! The canonical document model.

use serde::Serialize;

use crate::utils::date::DateTimeUtc;

/// A single content document (a note) with normalized metadata.
///
/// # Fields
///
/// | Field     | Type                  | Description                      |
/// |-----------|-----------------------|----------------------------------|
/// | `slug`    | `String`              | URL identifier (file stem)       |
/// | `title`   | `String`              | Document title                   |
/// | `date`    | `Option<DateTimeUtc>` | Publication date (absent if invalid or missing) |
/// | `excerpt` | `String`              | Short description                |
/// | `tags`    | `Vec<String>`         | Categorization tags              |
/// | `image`   | `Option<String>`      | Cover image path or URL          |
/// | `content` | `String`              | Raw Markdown body (not serialized) |
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTimeUtc>,
    pub excerpt: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Markdown body. Excluded from metadata serialization; single-document
    /// responses and feeds attach it explicitly.
    #[serde(skip_serializing)]
    pub content: String,
}

impl Document {
    /// Render the Markdown body to HTML.
    pub fn content_html(&self) -> String {
        use pulldown_cmark::{Options, Parser, html};

        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_TABLES);
        opts.insert(Options::ENABLE_FOOTNOTES);
        opts.insert(Options::ENABLE_STRIKETHROUGH);
        opts.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(&self.content, opts);
        let mut out = String::with_capacity(self.content.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }

    /// Metadata as a JSON value, with the body attached under `content`.
    pub fn to_full_json(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(map) = value.as_object_mut() {
            map.insert(
                "content".to_string(),
                serde_json::Value::String(self.content.clone()),
            );
        }
        value
    }
}
