use thiserror::Error;

/// Unified error type for version-sync operations
#[derive(Error, Debug)]
pub enum VersionSyncError {
    #[error("Invalid version format: {version} (expected X.Y.Z)")]
    InvalidFormat { version: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read {path}: {reason}")]
    ReadFailure { path: String, reason: String },

    #[error(
        "Pattern not found in {file}: {pattern}\n   \
         Verify the pattern matches your file format\n   \
         Common patterns:\n   \
         - YAML: r'^version:.*$'\n   \
         - TOML: r'^version\\s*=\\s*\".*\"$'\n   \
         - Dockerfile: r'LABEL version=\".*\"$'"
    )]
    PatternNotFound { file: String, pattern: String },

    #[error("Invalid version pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid bump_type: {kind} (use \"major\", \"minor\", or \"patch\")")]
    InvalidBumpKind { kind: String },

    #[error("Failed to parse version {version}: {reason}")]
    ParseError { version: String, reason: String },

    #[error("Git repository not found (.git directory missing)\n   Initialize git first: git init")]
    VcsMissing,

    #[error(
        "Could not detect project type\n   \
         Supported marker files:\n   \
         - galaxy.yml (Ansible Collection)\n   \
         - pyproject.toml (Python)\n   \
         - Chart.yaml (Helm)\n   \
         - Dockerfile (Docker)"
    )]
    UnsupportedProjectType,

    #[error(
        "Detected the version-sync project itself ({marker})\n\n\
         Git hooks are meant for projects that consume version-sync,\n\
         not for version-sync's own repository.\n\n\
         Manage this project's version by editing VERSION directly.\n\n\
         No hooks installed."
    )]
    SelfTargetRefused { marker: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-sync
pub type Result<T> = std::result::Result<T, VersionSyncError>;

impl VersionSyncError {
    /// Create an invalid format error for the given (trimmed) version text
    pub fn invalid_format(version: impl Into<String>) -> Self {
        VersionSyncError::InvalidFormat {
            version: version.into(),
        }
    }

    /// Create a parse error naming the offending version
    pub fn parse(version: impl Into<String>, reason: impl ToString) -> Self {
        VersionSyncError::ParseError {
            version: version.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a pattern-not-found error for a target file
    pub fn pattern_not_found(file: impl Into<String>, pattern: impl Into<String>) -> Self {
        VersionSyncError::PatternNotFound {
            file: file.into(),
            pattern: pattern.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionSyncError::Config(msg.into())
    }

    /// Map an I/O error on `path` to the read taxonomy.
    pub fn from_read(path: impl Into<String>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => VersionSyncError::FileNotFound { path },
            _ => VersionSyncError::ReadFailure {
                path,
                reason: err.to_string(),
            },
        }
    }
}
