use crate::error::{Result, VersionSyncError};
use crate::tree::{normalize, FileTree, StagedFile};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory tree for testing without touching the filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
    staged: BTreeMap<String, StagedFile>,
}

impl MemoryTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pre-existing file (not staged)
    pub fn add_file(&mut self, path: &str, contents: impl Into<String>) {
        self.files.insert(normalize(path), contents.into());
    }

    /// Add a pre-existing, possibly empty, directory
    pub fn add_dir(&mut self, path: &str) {
        self.dirs.insert(normalize(path));
    }

    /// Builder form of [MemoryTree::add_file]
    pub fn file(mut self, path: &str, contents: impl Into<String>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Builder form of [MemoryTree::add_dir]
    pub fn dir(mut self, path: &str) -> Self {
        self.add_dir(path);
        self
    }

    /// Permission bits a staged file was written with
    pub fn mode(&self, path: &str) -> Option<u32> {
        self.staged.get(&normalize(path)).and_then(|f| f.mode)
    }
}

impl FileTree for MemoryTree {
    fn read(&self, path: &str) -> Result<String> {
        let key = normalize(path);
        self.staged
            .get(&key)
            .map(|f| f.contents.clone())
            .or_else(|| self.files.get(&key).cloned())
            .ok_or_else(|| VersionSyncError::FileNotFound {
                path: path.to_string(),
            })
    }

    fn exists(&self, path: &str) -> bool {
        let key = normalize(path);
        self.staged.contains_key(&key) || self.files.contains_key(&key)
    }

    fn is_dir(&self, path: &str) -> bool {
        let key = normalize(path);
        let prefix = format!("{}/", key);
        self.dirs.contains(&key)
            || self.dirs.iter().any(|d| d.starts_with(&prefix))
            || self.files.keys().any(|p| p.starts_with(&prefix))
            || self.staged.keys().any(|p| p.starts_with(&prefix))
    }

    fn with_new_file(&self, path: &str, contents: String, mode: Option<u32>) -> Self {
        let key = normalize(path);
        let mut next = self.clone();
        next.staged.insert(
            key.clone(),
            StagedFile {
                path: key,
                contents,
                mode,
            },
        );
        next
    }

    fn staged(&self) -> Vec<&StagedFile> {
        self.staged.values().collect()
    }
}
