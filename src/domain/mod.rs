//! Domain logic - pure text rules independent of the file tree

pub mod pattern;
pub mod project;
pub mod template;
pub mod version;

pub use pattern::{extract, VersionPattern};
pub use project::{detect, ProjectType};
pub use template::{sync, LineTemplate};
pub use version::{bump_str, validate, BumpKind, Component, Version};
