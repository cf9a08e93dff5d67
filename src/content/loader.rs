//! Document loading from the content directory.
//!
//! Failures are typed [`ContentError`]s. Listings drop malformed documents
//! with a log line and only surface I/O errors; point lookups fold malformed
//! into [`ContentError::NotFound`] so callers map errors to HTTP statuses
//! without inspecting parse details.

use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::document::Document;
use crate::content::front_matter;
use crate::log;
use crate::utils::date::{self, DateTimeUtc};

/// Errors raised while loading documents.
#[derive(Debug, Error)]
pub enum ContentError {
    /// No document exists for the requested slug.
    #[error("note not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid front matter in {path}: {reason}")]
    FrontMatter { path: PathBuf, reason: String },

    /// Title is the only required front-matter field.
    #[error("missing title in {0}")]
    MissingTitle(PathBuf),
}

/// Loads and orders documents from a flat content directory.
pub struct NoteStore {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl NoteStore {
    pub fn new(dir: PathBuf, extensions: Vec<String>) -> Self {
        Self { dir, extensions }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            config.content.dir.clone(),
            config.content.extensions.clone(),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every document, sorted newest first.
    ///
    /// A malformed document (bad front matter, missing title) is logged and
    /// skipped so one broken file never takes down the whole listing; I/O
    /// failures still propagate. Undated documents sort last; ties break on
    /// slug so the order is stable across runs. A missing content directory
    /// yields an empty list.
    pub fn load_all(&self) -> Result<Vec<Document>, ContentError> {
        let files = self.document_files()?;

        let results: Vec<_> = files.par_iter().map(|path| self.load_file(path)).collect();

        let mut docs = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(doc) => docs.push(doc),
                Err(error @ ContentError::Io { .. }) => return Err(error),
                Err(error) => log!("content"; "skipping document: {error}"),
            }
        }

        docs.sort_by(compare_newest_first);
        Ok(docs)
    }

    /// Load a single document by slug.
    ///
    /// Succeeds exactly when a matching file exists and parses; a malformed
    /// file is treated as [`ContentError::NotFound`] so callers make one
    /// uniform missing-vs-present decision. I/O failures still propagate.
    pub fn load_slug(&self, slug: &str) -> Result<Document, ContentError> {
        // Slugs come from URLs; never let them escape the content directory.
        if slug.is_empty() || slug.contains(['/', '\\']) || slug.contains("..") {
            return Err(ContentError::NotFound(slug.to_string()));
        }

        for ext in &self.extensions {
            let candidate = self.dir.join(format!("{slug}.{ext}"));
            if candidate.is_file() {
                return match self.load_file(&candidate) {
                    Ok(doc) => Ok(doc),
                    Err(error @ ContentError::Io { .. }) => Err(error),
                    Err(error) => {
                        log!("content"; "treating {} as missing: {error}", candidate.display());
                        Err(ContentError::NotFound(slug.to_string()))
                    }
                };
            }
        }

        Err(ContentError::NotFound(slug.to_string()))
    }

    /// List document files in the content directory (non-recursive).
    pub fn document_files(&self) -> Result<Vec<PathBuf>, ContentError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ContentError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && self.matches_extension(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn load_file(&self, path: &Path) -> Result<Document, ContentError> {
        let source = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (fm, body) = front_matter::extract(&source)
            .map_err(|e| ContentError::FrontMatter {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .ok_or_else(|| ContentError::FrontMatter {
                path: path.to_path_buf(),
                reason: "missing front matter block".to_string(),
            })?;

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let title = fm
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ContentError::MissingTitle(path.to_path_buf()))?;

        let date = fm.date.as_deref().and_then(|raw| parse_date(raw, path));

        Ok(Document {
            slug,
            title,
            date,
            excerpt: fm.excerpt.unwrap_or_default(),
            tags: fm.tags,
            image: fm.image,
            content: body.to_string(),
        })
    }
}

/// Parse a front-matter date, logging and dropping anything invalid.
///
/// A bad date must not take the whole document down: the document still
/// loads, it just sorts last and feeds omit its timestamp.
fn parse_date(raw: &str, path: &Path) -> Option<DateTimeUtc> {
    let parsed = DateTimeUtc::parse(raw);
    if parsed.is_none() {
        log!("content"; "ignoring invalid date {:?} in {}", raw, path.display());
    }
    parsed
}

/// Date descending, undated last, slug ascending as tie-break.
fn compare_newest_first(a: &Document, b: &Document) -> Ordering {
    date::newest_first(a.date, b.date).then_with(|| a.slug.cmp(&b.slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_note(dir: &Path, name: &str, front: &str, body: &str) {
        fs::write(dir.join(name), format!("---\n{front}\n---\n\n{body}")).unwrap();
    }

    fn store(dir: &Path) -> NoteStore {
        NoteStore::new(dir.to_path_buf(), vec!["md".into(), "mdx".into()])
    }

    #[test]
    fn test_load_all_counts_every_document() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "a.md", "title: A\ndate: 2024-01-01", "body a");
        write_note(tmp.path(), "b.mdx", "title: B\ndate: 2024-02-01", "body b");
        write_note(tmp.path(), "c.md", "title: C", "body c");
        fs::write(tmp.path().join("ignored.txt"), "not a note").unwrap();

        let docs = store(tmp.path()).load_all().unwrap();
        assert_eq!(docs.len(), 3);
    }

    #[test]
    fn test_load_all_sorts_newest_first_undated_last() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "old.md", "title: Old\ndate: 2023-01-01", "");
        write_note(tmp.path(), "new.md", "title: New\ndate: 2024-06-15", "");
        write_note(tmp.path(), "undated.md", "title: U", "");
        write_note(tmp.path(), "mid.md", "title: Mid\ndate: 2023-08-20", "");

        let docs = store(tmp.path()).load_all().unwrap();
        let slugs: Vec<_> = docs.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid", "old", "undated"]);
    }

    #[test]
    fn test_same_date_breaks_tie_on_slug() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "zebra.md", "title: Z\ndate: 2024-01-01", "");
        write_note(tmp.path(), "apple.md", "title: A\ndate: 2024-01-01", "");

        let docs = store(tmp.path()).load_all().unwrap();
        assert_eq!(docs[0].slug, "apple");
        assert_eq!(docs[1].slug, "zebra");
    }

    #[test]
    fn test_load_slug_finds_existing() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(
            tmp.path(),
            "hello.md",
            "title: Hello\ndate: 2024-06-15\ntags: a, b",
            "the body",
        );

        let doc = store(tmp.path()).load_slug("hello").unwrap();
        assert_eq!(doc.title, "Hello");
        assert_eq!(doc.tags, vec!["a", "b"]);
        assert!(doc.content.contains("the body"));
    }

    #[test]
    fn test_load_slug_missing_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = store(tmp.path()).load_slug("nope").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(s) if s == "nope"));
    }

    #[test]
    fn test_load_slug_rejects_path_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "real.md", "title: R", "");

        let s = store(tmp.path());
        assert!(matches!(
            s.load_slug("../real"),
            Err(ContentError::NotFound(_))
        ));
        assert!(matches!(
            s.load_slug("sub/real"),
            Err(ContentError::NotFound(_))
        ));
        assert!(matches!(s.load_slug(""), Err(ContentError::NotFound(_))));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let s = store(&tmp.path().join("does-not-exist"));
        assert!(s.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_date_loads_without_date() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "bad.md", "title: Bad\ndate: not-a-date", "");

        let docs = store(tmp.path()).load_all().unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].date.is_none());
    }

    #[test]
    fn test_malformed_documents_skipped_from_listing() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "good.md", "title: Good\ndate: 2024-01-01", "");
        write_note(tmp.path(), "untitled.md", "date: 2024-01-01", "");
        fs::write(tmp.path().join("plain.md"), "# No front matter").unwrap();

        let docs = store(tmp.path()).load_all().unwrap();
        let slugs: Vec<_> = docs.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["good"]);
    }

    #[test]
    fn test_malformed_lookup_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("plain.md"), "# No front matter").unwrap();
        write_note(tmp.path(), "untitled.md", "date: 2024-01-01", "");

        let s = store(tmp.path());
        assert!(matches!(
            s.load_slug("plain"),
            Err(ContentError::NotFound(_))
        ));
        assert!(matches!(
            s.load_slug("untitled"),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn test_unreadable_directory_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let not_a_dir = tmp.path().join("content");
        fs::write(&not_a_dir, "plain file").unwrap();

        let err = store(&not_a_dir).load_all().unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }
}
