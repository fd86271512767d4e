pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod tree;
pub mod ui;
pub mod warning;

pub use error::{Result, VersionSyncError};
