//! Optional in-memory document cache for the server.
//!
//! Rebuilding the document list on every request keeps responses fresh but
//! costs a full directory read plus parsing. With `[serve] cache = true` the
//! loaded list is kept behind an [`ArcSwapOption`] and only rebuilt when the
//! content directory's signature (file names, sizes, mtimes) changes. A mutex
//! makes the rebuild single-flight so concurrent requests after an edit do
//! not all reload at once.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;

use crate::content::document::Document;
use crate::content::loader::{ContentError, NoteStore};
use crate::debug;
use crate::utils::hash::Signature;

pub struct ContentCache {
    store: NoteStore,
    enabled: bool,
    snapshot: ArcSwapOption<Snapshot>,
    reload: Mutex<()>,
}

struct Snapshot {
    signature: u64,
    docs: Arc<Vec<Document>>,
}

impl ContentCache {
    pub fn new(store: NoteStore, enabled: bool) -> Self {
        Self {
            store,
            enabled,
            snapshot: ArcSwapOption::const_empty(),
            reload: Mutex::new(()),
        }
    }

    /// The current document list, newest first.
    ///
    /// With caching disabled this is a plain load. With caching enabled the
    /// stored snapshot is served as long as the directory signature matches.
    pub fn documents(&self) -> Result<Arc<Vec<Document>>, ContentError> {
        if !self.enabled {
            return Ok(Arc::new(self.store.load_all()?));
        }

        let signature = self.signature()?;
        if let Some(snap) = self.snapshot.load_full()
            && snap.signature == signature
        {
            return Ok(snap.docs.clone());
        }

        let _guard = self.reload.lock();

        // Another request may have refreshed while we waited for the lock.
        if let Some(snap) = self.snapshot.load_full()
            && snap.signature == signature
        {
            return Ok(snap.docs.clone());
        }

        debug!("serve"; "content changed, reloading documents");
        let docs = Arc::new(self.store.load_all()?);
        self.snapshot.store(Some(Arc::new(Snapshot {
            signature,
            docs: docs.clone(),
        })));
        Ok(docs)
    }

    /// Digest of the content directory from file names, sizes and mtimes.
    fn signature(&self) -> Result<u64, ContentError> {
        let files = self.store.document_files()?;

        let mut sig = Signature::new();
        sig.push_u64(files.len() as u64);
        for path in &files {
            let meta = std::fs::metadata(path).map_err(|source| ContentError::Io {
                path: path.clone(),
                source,
            })?;
            if let Some(name) = path.file_name() {
                sig.push_bytes(name.as_encoded_bytes());
            }
            sig.push_u64(meta.len());
            let mtime = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);
            sig.push_u64(mtime);
        }
        Ok(sig.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_note(dir: &Path, name: &str, title: &str) {
        fs::write(dir.join(name), format!("---\ntitle: {title}\n---\nbody")).unwrap();
    }

    fn cache(dir: &Path, enabled: bool) -> ContentCache {
        let store = NoteStore::new(dir.to_path_buf(), vec!["md".into()]);
        ContentCache::new(store, enabled)
    }

    #[test]
    fn test_disabled_cache_always_reloads() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "a.md", "A");

        let cache = cache(tmp.path(), false);
        assert_eq!(cache.documents().unwrap().len(), 1);

        write_note(tmp.path(), "b.md", "B");
        assert_eq!(cache.documents().unwrap().len(), 2);
    }

    #[test]
    fn test_enabled_cache_reuses_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "a.md", "A");

        let cache = cache(tmp.path(), true);
        let first = cache.documents().unwrap();
        let second = cache.documents().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_enabled_cache_refreshes_on_new_file() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "a.md", "A");

        let cache = cache(tmp.path(), true);
        assert_eq!(cache.documents().unwrap().len(), 1);

        write_note(tmp.path(), "b.md", "B");
        let docs = cache.documents().unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_enabled_cache_skips_malformed_on_refresh() {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "a.md", "A");

        let cache = cache(tmp.path(), true);
        assert_eq!(cache.documents().unwrap().len(), 1);

        // A malformed file changes the signature but drops out of the list.
        fs::write(tmp.path().join("broken.md"), "no front matter here").unwrap();
        assert_eq!(cache.documents().unwrap().len(), 1);
    }

    #[test]
    fn test_enabled_cache_propagates_io_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let not_a_dir = tmp.path().join("content");
        fs::write(&not_a_dir, "plain file").unwrap();

        let cache = cache(&not_a_dir, true);
        assert!(cache.documents().is_err());
    }
}
