//! Operations exposed by version-sync
//!
//! Each operation takes a [FileTree] snapshot and either returns text
//! (read-only operations, which never fail) or a new snapshot with the
//! changed files staged (mutating operations, which propagate errors).
//! Nothing here writes to disk; argument types are decoupled from clap so
//! the operations can be called programmatically.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::domain::{self, ProjectType, Version, VersionPattern};
use crate::error::{Result, VersionSyncError};
use crate::hooks::{self, HookKind, HOOK_MODE};
use crate::tree::FileTree;
use crate::warning::SetupWarning;

/// Version file read by hook setup
pub const DEFAULT_VERSION_FILE: &str = "VERSION";

/// Project descriptor identifying version-sync's own repository
pub const SELF_DESCRIPTOR: &str = "Cargo.toml";

/// Which files to compare or synchronise, and how to find the version line
#[derive(Debug, Clone, PartialEq)]
pub struct TargetArgs {
    /// Source of truth holding the bare version
    pub version_file: String,

    /// File carrying an embedded copy of the version
    pub target_file: String,

    /// Pattern locating the version line in `target_file`
    pub version_pattern: String,
}

impl Default for TargetArgs {
    fn default() -> Self {
        TargetArgs::from(&Config::default())
    }
}

impl From<&Config> for TargetArgs {
    fn from(config: &Config) -> Self {
        TargetArgs {
            version_file: config.version_file.clone(),
            target_file: config.target_file.clone(),
            version_pattern: config.version_pattern.clone(),
        }
    }
}

/// Outcome of [release]
#[derive(Debug, Clone)]
pub struct ReleasePlan<T> {
    /// Synced tree, absent when the release could not be prepared
    pub tree: Option<T>,

    /// Human-readable report with the suggested git commands
    pub report: String,
}

/// Outcome of [setup_git_hooks]
#[derive(Debug, Clone)]
pub struct HookSetup<T> {
    /// Tree with the installed hooks staged
    pub tree: T,

    /// Project type the hooks were configured for
    pub project: ProjectType,

    /// Hooks written to the tree
    pub installed: Vec<HookKind>,

    /// Hooks left alone, with the reason
    pub warnings: Vec<SetupWarning>,
}

/// Read and validate the source version, trimmed.
fn read_source_version<T: FileTree>(tree: &T, version_file: &str) -> Result<String> {
    let content = tree.read(version_file)?;
    let version = content.trim();
    domain::validate(version)?;
    Ok(version.to_string())
}

fn version_file_failure(version_file: &str, err: &VersionSyncError) -> String {
    match err {
        VersionSyncError::FileNotFound { .. } | VersionSyncError::ReadFailure { .. } => format!(
            "❌ {}\n   Create a {} file with format X.Y.Z (e.g., 1.0.0)",
            err, version_file
        ),
        _ => format!("❌ {}", err),
    }
}

fn target_file_failure(err: &VersionSyncError) -> String {
    format!("❌ {}\n   Check that the file exists and path is correct", err)
}

/// Read the current version from `version_file`.
///
/// # Returns
/// The trimmed version, or a `❌`-prefixed error text.
pub fn get_version<T: FileTree>(tree: &T, version_file: &str) -> String {
    match read_source_version(tree, version_file) {
        Ok(version) => version,
        Err(e) => version_file_failure(version_file, &e),
    }
}

/// Compare the version in the source file with the one embedded in the target.
///
/// # Returns
/// A verdict starting with `✅` when consistent, `⚠️` on mismatch, `❌` on error.
pub fn validate_version<T: FileTree>(tree: &T, args: &TargetArgs) -> String {
    let source_version = match read_source_version(tree, &args.version_file) {
        Ok(version) => version,
        Err(e) => return version_file_failure(&args.version_file, &e),
    };

    let pattern = match VersionPattern::new(&args.version_pattern) {
        Ok(pattern) => pattern,
        Err(e) => return format!("❌ {}", e),
    };

    let target_content = match tree.read(&args.target_file) {
        Ok(content) => content,
        Err(e) => return target_file_failure(&e),
    };

    let Some(target_version) = domain::extract(&target_content, &pattern) else {
        return format!(
            "❌ Could not find version in {} matching pattern: {}\n   \
             Verify the pattern matches your file format",
            args.target_file, args.version_pattern
        );
    };

    if source_version == target_version {
        tracing::info!(version = %source_version, "versions consistent");
        return format!("✅ Version {} is consistent", source_version);
    }

    tracing::info!(source = %source_version, target = %target_version, "version mismatch");
    let direction = match (
        Version::parse(&source_version),
        Version::parse(&target_version),
    ) {
        (Ok(source), Ok(target)) if target < source => {
            format!(" ({} is behind)", args.target_file)
        }
        (Ok(source), Ok(target)) if target > source => {
            format!(" ({} is ahead)", args.target_file)
        }
        _ => String::new(),
    };
    format!(
        "⚠️  Mismatch: {}={}, {}={}{}\n   Run: {}",
        args.version_file,
        source_version,
        args.target_file,
        target_version,
        direction,
        hooks::sync_command(&args.target_file, &args.version_pattern)
    )
}

/// Copy the source version into the target file's version line.
///
/// # Returns
/// * `Ok(T)` - New snapshot with the target file staged
/// * `Err` - Source version missing or invalid, target unreadable,
///   pattern invalid or matching no line
pub fn sync_version<T: FileTree>(tree: &T, args: &TargetArgs) -> Result<T> {
    let version = read_source_version(tree, &args.version_file)?;
    let pattern = VersionPattern::new(&args.version_pattern)?;
    let content = tree.read(&args.target_file)?;

    let updated = domain::sync(&content, &version, &pattern, &args.target_file)?;
    tracing::info!(version = %version, target = %args.target_file, "synced");

    Ok(tree.with_new_file(&args.target_file, updated, None))
}

/// Increment the version stored in `version_file`.
///
/// `bump_type` is lowercased before it is checked. The file is rewritten
/// with the bare new version and no trailing newline.
pub fn bump_version<T: FileTree>(tree: &T, bump_type: &str, version_file: &str) -> Result<T> {
    let current = read_source_version(tree, version_file)?;
    let next = domain::bump_str(&current, &bump_type.to_lowercase())?;
    tracing::info!(from = %current, to = %next, "bumped");

    Ok(tree.with_new_file(version_file, next.to_string(), None))
}

/// Sync, validate, and print the git commands that would publish the release.
///
/// The commands are suggestions only; nothing is executed. Failures are
/// reported in the returned text with no tree attached.
pub fn release<T: FileTree>(
    tree: &T,
    args: &TargetArgs,
    tag_message: Option<&str>,
) -> ReleasePlan<T> {
    let version = match read_source_version(tree, &args.version_file) {
        Ok(version) => version,
        Err(e) => {
            return ReleasePlan {
                tree: None,
                report: version_file_failure(&args.version_file, &e),
            }
        }
    };

    let synced = match sync_version(tree, args) {
        Ok(synced) => synced,
        Err(e) => {
            return ReleasePlan {
                tree: None,
                report: format!("❌ {}", e),
            }
        }
    };
    let sync_msg = format!("✅ Synced {} → {}", version, args.target_file);
    let validation_msg = validate_version(&synced, args);

    let default_message = format!("Release {}", version);
    let tag_msg = hooks::shell_escape(tag_message.unwrap_or(&default_message));

    let report = format!(
        "🚀 Release {version} Ready

{sync_msg}
{validation_msg}

Next steps (run these commands manually):

  git add {version_file} {target_file}
  git commit -m \"Release {version}\"
  git tag -a v{version} -m \"{tag_msg}\"
  git push && git push --tags

Note: Review changes before committing!
",
        version = version,
        sync_msg = sync_msg,
        validation_msg = validation_msg,
        version_file = args.version_file,
        target_file = args.target_file,
        tag_msg = tag_msg,
    );

    ReleasePlan {
        tree: Some(synced),
        report,
    }
}

/// Whether `tree` is version-sync's own repository.
fn is_self_project<T: FileTree>(tree: &T) -> bool {
    let Ok(manifest) = tree.read(SELF_DESCRIPTOR) else {
        return false;
    };
    let Ok(table) = manifest.parse::<toml::Table>() else {
        return false;
    };
    table
        .get("package")
        .and_then(|package| package.get("name"))
        .and_then(|name| name.as_str())
        == Some(env!("CARGO_PKG_NAME"))
}

/// Install pre-commit and pre-push hooks that re-run validation.
///
/// Hooks are configured from the detected project type and the version in
/// `VERSION`. A hook slot holding a file version-sync did not write is
/// skipped and reported as a warning.
///
/// # Returns
/// * `Ok(HookSetup)` - New snapshot with the installed hooks staged
/// * `Err(VcsMissing)` - If there is no `.git` directory
/// * `Err(SelfTargetRefused)` - If run on version-sync's own repository
/// * `Err(UnsupportedProjectType)` - If no marker file is present
/// * `Err` - If `VERSION` is missing or invalid
pub fn setup_git_hooks<T: FileTree>(tree: &T, installed_at: DateTime<Utc>) -> Result<HookSetup<T>> {
    if !tree.is_dir(".git") {
        return Err(VersionSyncError::VcsMissing);
    }

    if is_self_project(tree) {
        return Err(VersionSyncError::SelfTargetRefused {
            marker: SELF_DESCRIPTOR.to_string(),
        });
    }

    let project = domain::detect(|marker| tree.exists(marker))
        .ok_or(VersionSyncError::UnsupportedProjectType)?;
    tracing::info!(project = %project, "detected project type");

    let version = read_source_version(tree, DEFAULT_VERSION_FILE)?;

    let mut updated = tree.clone();
    let mut installed = Vec::new();
    let mut warnings = Vec::new();

    for kind in HookKind::ALL {
        if !hooks::inspect(&updated, kind).can_install() {
            tracing::warn!(hook = kind.name(), "leaving unmanaged hook in place");
            warnings.push(SetupWarning::UnmanagedHook { path: kind.path() });
            continue;
        }

        let script = hooks::generate(
            kind,
            &version,
            project.target_file(),
            project.version_pattern(),
            installed_at,
        );
        updated = updated.with_new_file(&kind.path(), script, Some(HOOK_MODE));
        installed.push(kind);
    }

    Ok(HookSetup {
        tree: updated,
        project,
        installed,
        warnings,
    })
}
