//! Batch analysis across a file set.
//!
//! [`FileSet`] is the file database: it assigns stable [`FileId`]s to
//! paths and holds contents behind a lock so loading and analysis can run
//! from multiple threads. Analysis itself shares nothing between files
//! except the read-only built-in registry and the exclusion set, so
//! [`analyze_files`] fans out with rayon and collects results back in
//! stable file-id order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::analyze::{analyze, Analysis, AnalyzeOptions};
use crate::base::FileId;

/// Manages the mapping between file paths and FileIds.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    path_to_id: IndexMap<PathBuf, FileId>,
    id_to_path: IndexMap<FileId, PathBuf>,
    contents: IndexMap<FileId, Arc<str>>,
    next_id: u32,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a FileId for a path.
    ///
    /// If the path already has a FileId, returns it. Otherwise assigns a
    /// new one.
    pub fn file_id(&self, path: &Path) -> FileId {
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.path_to_id.get(path) {
                return id;
            }
        }

        // Slow path: write lock
        let mut inner = self.inner.write();

        // Double-check
        if let Some(&id) = inner.path_to_id.get(path) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        inner.path_to_id.insert(path.to_owned(), id);
        inner.id_to_path.insert(id, path.to_owned());
        id
    }

    /// Get the path for a FileId.
    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.inner.read().id_to_path.get(&file).cloned()
    }

    /// Set the contents of a file.
    pub fn set_contents(&self, file: FileId, contents: impl Into<Arc<str>>) {
        self.inner.write().contents.insert(file, contents.into());
    }

    /// Get the contents of a file.
    pub fn contents(&self, file: FileId) -> Option<Arc<str>> {
        self.inner.read().contents.get(&file).cloned()
    }

    /// Register a path and its contents in one step.
    pub fn insert(&self, path: &Path, contents: impl Into<Arc<str>>) -> FileId {
        let id = self.file_id(path);
        self.set_contents(id, contents);
        id
    }

    /// Remove a file from the set.
    pub fn remove(&self, file: FileId) {
        let mut inner = self.inner.write();
        if let Some(path) = inner.id_to_path.swap_remove(&file) {
            inner.path_to_id.swap_remove(&path);
        }
        inner.contents.swap_remove(&file);
    }

    pub fn len(&self) -> usize {
        self.inner.read().path_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All file IDs, in insertion order.
    pub fn files(&self) -> Vec<FileId> {
        self.inner.read().id_to_path.keys().copied().collect()
    }
}

/// One file's analysis outcome within a batch.
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub file: FileId,
    pub analysis: Analysis,
}

/// Analyze every file in the set in parallel.
///
/// Files with no stored contents are skipped. Results come back sorted by
/// file id, so batch output is deterministic regardless of scheduling.
pub fn analyze_files(files: &FileSet, options: &AnalyzeOptions) -> Vec<FileAnalysis> {
    let ids = files.files();
    tracing::debug!(files = ids.len(), "batch analysis started");

    let mut results: Vec<FileAnalysis> = ids
        .par_iter()
        .filter_map(|&file| {
            let contents = files.contents(file)?;
            Some(FileAnalysis {
                file,
                analysis: analyze(&contents, options),
            })
        })
        .collect();

    results.sort_by_key(|r| r.file);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_set_id_assignment() {
        let files = FileSet::new();

        let id1 = files.file_id(Path::new("/a.php"));
        let id2 = files.file_id(Path::new("/b.php"));
        let id3 = files.file_id(Path::new("/a.php")); // same as id1

        assert_ne!(id1, id2);
        assert_eq!(id1, id3); // stable ID for same path
    }

    #[test]
    fn test_file_set_contents() {
        let files = FileSet::new();
        let id = files.file_id(Path::new("/test.php"));

        assert!(files.contents(id).is_none());

        files.set_contents(id, "<?php strlen($x);");

        assert_eq!(files.contents(id).as_deref(), Some("<?php strlen($x);"));
    }

    #[test]
    fn test_file_set_remove() {
        let files = FileSet::new();
        let id = files.insert(Path::new("/test.php"), "<?php ");
        assert_eq!(files.len(), 1);

        files.remove(id);
        assert!(files.is_empty());
        assert!(files.contents(id).is_none());
    }

    #[test]
    fn test_batch_results_ordered_and_independent() {
        let files = FileSet::new();
        files.insert(Path::new("/a.php"), "<?php\nnamespace A;\nstrlen($x);\n");
        files.insert(
            Path::new("/b.php"),
            "<?php\nnamespace B;\nuse function count;\ncount($x);\n",
        );
        files.insert(Path::new("/c.php"), "<?php\nnamespace C;\ncount($x);\n");

        let results = analyze_files(&files, &AnalyzeOptions::new());
        assert_eq!(results.len(), 3);

        let ids: Vec<_> = results.iter().map(|r| r.file).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);

        // The import in /b.php must not leak into /a.php or /c.php.
        assert_eq!(results[0].analysis.diagnostics.len(), 1);
        assert!(results[1].analysis.is_clean());
        assert_eq!(results[2].analysis.diagnostics.len(), 1);
    }

    #[test]
    fn test_files_without_contents_skipped() {
        let files = FileSet::new();
        files.file_id(Path::new("/registered-only.php"));
        files.insert(Path::new("/real.php"), "<?php\n");

        let results = analyze_files(&files, &AnalyzeOptions::new());
        assert_eq!(results.len(), 1);
    }
}
