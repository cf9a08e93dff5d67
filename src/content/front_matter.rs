//! Front-matter extraction from YAML-like (`---`) or TOML (`+++`) blocks.

use anyhow::Result;
use serde::Deserialize;

/// Raw front-matter fields before validation.
///
/// Upstream sources disagree on field names, so the common aliases are
/// collapsed here: `publishedAt` folds into `date`, and `summary` or
/// `description` fold into `excerpt`. An explicit canonical key always wins
/// over its aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    #[serde(alias = "publishedAt")]
    pub date: Option<String>,
    #[serde(alias = "summary", alias = "description")]
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    #[serde(alias = "cover")]
    pub image: Option<String>,
}

/// Extract front matter and return `(fields, body)`.
///
/// Returns `Ok(None)` when the source has no front-matter block at all.
pub fn extract(source: &str) -> Result<Option<(FrontMatter, &str)>> {
    match detect(source) {
        Some((block, body, is_toml)) => {
            let fm = if is_toml {
                parse_toml(block)?
            } else {
                parse_yaml_like(block)
            };
            Ok(Some((fm, body)))
        }
        None => Ok(None),
    }
}

/// Detect a front-matter block.
/// Returns `(block, body, is_toml)` if found.
fn detect(source: &str) -> Option<(&str, &str, bool)> {
    let trimmed = source.trim_start();

    // YAML-like: ---...---
    if trimmed.starts_with("---")
        && let Some(end) = trimmed[3..].find("\n---")
    {
        let block = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('\n');
        return Some((block, body, false));
    }

    // TOML: +++...+++
    if trimmed.starts_with("+++")
        && let Some(end) = trimmed[3..].find("\n+++")
    {
        let block = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('\n');
        return Some((block, body, true));
    }

    None
}

/// Parse simple YAML-like front matter (key: value).
fn parse_yaml_like(block: &str) -> FrontMatter {
    let mut fm = FrontMatter::default();

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let key_lower = key.trim().to_lowercase();
            let value = strip_quotes(value.trim());

            match key_lower.as_str() {
                "title" => fm.title = Some(value.to_string()),
                "date" => fm.date = Some(value.to_string()),
                "publishedat" | "published_at" => {
                    if fm.date.is_none() {
                        fm.date = Some(value.to_string());
                    }
                }
                "excerpt" => fm.excerpt = Some(value.to_string()),
                "summary" | "description" => {
                    if fm.excerpt.is_none() {
                        fm.excerpt = Some(value.to_string());
                    }
                }
                "image" | "cover" => fm.image = Some(value.to_string()),
                "tags" => fm.tags = parse_tags(value),
                _ => {}
            }
        }
    }

    fm
}

/// Parse TOML front matter.
fn parse_toml(block: &str) -> Result<FrontMatter> {
    toml::from_str(block).map_err(|e| anyhow::anyhow!("invalid TOML front matter: {e}"))
}

/// Parse a tags value: either `[a, b, c]` or a comma-separated list.
fn parse_tags(value: &str) -> Vec<String> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    inner
        .split(',')
        .map(|s| strip_quotes(s.trim()).to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Strip one pair of matching surrounding quotes.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
