use std::fmt;

/// Non-fatal issues hit while setting up hooks.
/// These are reported to the user but do not abort the operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupWarning {
    /// A hook file exists that version-sync did not write
    UnmanagedHook { path: String },
}

impl fmt::Display for SetupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupWarning::UnmanagedHook { path } => {
                write!(
                    f,
                    "{} exists but is not managed by version-sync\n   \
                     Remove it manually if you want version-sync to manage it",
                    path
                )
            }
        }
    }
}
