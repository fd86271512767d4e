//! Git hooks that re-check version consistency
//!
//! Two hooks are managed:
//! - pre-commit: before a commit is recorded
//! - pre-push: before refs are pushed
//!
//! Hooks written by version-sync carry [MANAGED_MARKER] so later runs can
//! tell them apart from hooks the user wrote by hand.

pub mod lifecycle;
pub mod script;

pub use lifecycle::{inspect, HookKind, HookStatus};
pub use script::{generate, shell_escape, sync_command};

/// Comment prefix identifying hooks managed by version-sync
pub const MANAGED_MARKER: &str = "# VERSION-SYNC-MANAGED:";

/// Permission bits for installed hooks
pub const HOOK_MODE: u32 = 0o755;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hooks_module_exports() {
        assert_eq!(HookKind::ALL.len(), 2);
        assert!(MANAGED_MARKER.starts_with('#'));
    }
}
