//! Command surface shared by the binary and library callers

pub mod orchestration;

pub use orchestration::{
    bump_version, get_version, release, setup_git_hooks, sync_version, validate_version,
    HookSetup, ReleasePlan, TargetArgs,
};
