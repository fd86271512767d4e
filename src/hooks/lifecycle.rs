use crate::hooks::MANAGED_MARKER;
use crate::tree::FileTree;

/// Git hooks version-sync installs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    PreCommit,
    PrePush,
}

impl HookKind {
    /// Installation order
    pub const ALL: [HookKind; 2] = [HookKind::PreCommit, HookKind::PrePush];

    /// Get the hook name as git knows it
    pub fn name(&self) -> &'static str {
        match self {
            HookKind::PreCommit => "pre-commit",
            HookKind::PrePush => "pre-push",
        }
    }

    /// Path of the hook file relative to the work tree root
    pub fn path(&self) -> String {
        format!(".git/hooks/{}", self.name())
    }

    /// The git action the hook guards, for human-readable text
    pub fn action(&self) -> &'static str {
        match self {
            HookKind::PreCommit => "commit",
            HookKind::PrePush => "push",
        }
    }
}

/// State of a hook slot before installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    /// No file at the hook path
    Missing,
    /// A hook carrying the managed-by marker
    Managed,
    /// A hook written by someone else; must not be overwritten
    Unmanaged,
}

impl HookStatus {
    pub fn can_install(&self) -> bool {
        !matches!(self, HookStatus::Unmanaged)
    }
}

/// Inspect the hook slot for `kind` in `tree`.
///
/// A hook file that exists but cannot be read counts as unmanaged.
pub fn inspect<T: FileTree>(tree: &T, kind: HookKind) -> HookStatus {
    let path = kind.path();
    if !tree.exists(&path) {
        return HookStatus::Missing;
    }
    match tree.read(&path) {
        Ok(content) if content.contains(MANAGED_MARKER) => HookStatus::Managed,
        _ => HookStatus::Unmanaged,
    }
}
