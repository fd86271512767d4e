//! User interface module - terminal output.
//!
//! Operations return plain text and data; everything printed to the terminal
//! goes through [formatter].

pub mod formatter;

pub use formatter::{
    display_dry_run, display_error, display_exported, display_report, display_setup_warning,
    display_status, display_success,
};
