//! File tree abstraction layer
//!
//! Operations read their inputs through the [FileTree] trait and never write
//! to disk themselves. A mutating operation returns a new tree snapshot with
//! the changed file staged; persisting it is left to the caller
//! ([DirTree::export]).
//!
//! - [DirTree]: a directory on disk with an in-memory overlay of staged files
//! - [MemoryTree]: a purely in-memory tree for tests

pub mod disk;
pub mod memory;

pub use disk::DirTree;
pub use memory::MemoryTree;

use crate::error::Result;

/// A file staged on a tree snapshot, waiting to be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Path relative to the tree root, `/`-separated
    pub path: String,
    pub contents: String,
    /// Unix permission bits, if the file needs specific ones
    pub mode: Option<u32>,
}

/// Read access to a project tree plus copy-on-write staging of new files.
///
/// Paths are relative to the tree root and use `/` as separator.
/// Staged files shadow what is underneath them, so reading a path after
/// [FileTree::with_new_file] returns the new contents.
pub trait FileTree: Clone {
    /// Read a file as UTF-8 text
    ///
    /// # Returns
    /// * `Ok(String)` - File contents
    /// * `Err(FileNotFound)` - If the file does not exist
    /// * `Err(ReadFailure)` - If the file exists but cannot be read
    fn read(&self, path: &str) -> Result<String>;

    /// Whether a regular file exists at `path`
    fn exists(&self, path: &str) -> bool;

    /// Whether a directory exists at `path`
    fn is_dir(&self, path: &str) -> bool;

    /// Return a new snapshot with `path` set to `contents`
    ///
    /// The receiver is left untouched.
    fn with_new_file(&self, path: &str, contents: String, mode: Option<u32>) -> Self;

    /// Files staged on this snapshot, ordered by path
    fn staged(&self) -> Vec<&StagedFile>;
}

/// Strips `./` prefixes and trailing separators so lookups agree.
pub(crate) fn normalize(path: &str) -> String {
    let mut path = path.replace('\\', "/");
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.to_string();
    }
    path.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("./VERSION"), "VERSION");
        assert_eq!(normalize(".git/hooks/"), ".git/hooks");
        assert_eq!(normalize(".\\.git\\hooks\\pre-commit"), ".git/hooks/pre-commit");
        assert_eq!(normalize("galaxy.yml"), "galaxy.yml");
    }
}
