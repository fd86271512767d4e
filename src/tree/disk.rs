use crate::error::{Result, VersionSyncError};
use crate::tree::{normalize, FileTree, StagedFile};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A project directory on disk with staged changes held in memory.
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
    staged: BTreeMap<String, StagedFile>,
}

impl DirTree {
    /// Open a tree rooted at `root`.
    ///
    /// # Returns
    /// * `Ok(DirTree)` - Tree over the directory
    /// * `Err(FileNotFound)` - If `root` is not a directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(VersionSyncError::FileNotFound {
                path: root.display().to_string(),
            });
        }
        Ok(DirTree {
            root,
            staged: BTreeMap::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write all staged files below `dest`, creating parent directories.
    ///
    /// Unix permission bits are applied where a staged file carries them.
    ///
    /// # Returns
    /// * `Ok(Vec<PathBuf>)` - Paths written, in staging order
    /// * `Err(Io)` - On the first failed write
    pub fn export(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.staged.len());

        for file in self.staged.values() {
            let target = dest.join(&file.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &file.contents)?;
            if let Some(mode) = file.mode {
                set_mode(&target, mode)?;
            }
            tracing::info!(path = %target.display(), "exported");
            written.push(target);
        }

        Ok(written)
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

impl FileTree for DirTree {
    fn read(&self, path: &str) -> Result<String> {
        let key = normalize(path);
        if let Some(file) = self.staged.get(&key) {
            return Ok(file.contents.clone());
        }
        fs::read_to_string(self.root.join(&key)).map_err(|e| VersionSyncError::from_read(path, e))
    }

    fn exists(&self, path: &str) -> bool {
        let key = normalize(path);
        self.staged.contains_key(&key) || self.root.join(&key).is_file()
    }

    fn is_dir(&self, path: &str) -> bool {
        let key = normalize(path);
        let prefix = format!("{}/", key);
        self.root.join(&key).is_dir() || self.staged.keys().any(|p| p.starts_with(&prefix))
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
