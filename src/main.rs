use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};

use version_sync::cli::{self, TargetArgs};
use version_sync::config::{self, Config};
use version_sync::tree::{DirTree, FileTree};
use version_sync::{logging, ui};

#[derive(Parser)]
#[command(
    name = "version-sync",
    version,
    about = "Keep a VERSION file in sync with the manifests that embed it"
)]
struct Args {
    #[arg(
        short,
        long,
        global = true,
        help = "Project directory (defaults to the enclosing git work tree)"
    )]
    source: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Log debug details to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct TargetOpts {
    #[arg(long, help = "Source version file [default: VERSION]")]
    version_file: Option<String>,

    #[arg(long, help = "File embedding the version [default: galaxy.yml]")]
    target_file: Option<String>,

    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Pattern matching the version line at line start [default: ^version:.*$]"
    )]
    version_pattern: Option<String>,
}

impl TargetOpts {
    /// Flags override the configuration file.
    fn resolve(&self, config: &Config) -> TargetArgs {
        let mut args = TargetArgs::from(config);
        if let Some(file) = &self.version_file {
            args.version_file = file.clone();
        }
        if let Some(file) = &self.target_file {
            args.target_file = file.clone();
        }
        if let Some(pattern) = &self.version_pattern {
            args.version_pattern = pattern.clone();
        }
        args
    }
}

#[derive(clap::Args)]
struct ExportOpts {
    #[arg(
        long,
        help = "Directory to write changed files to (defaults to the source directory)"
    )]
    export: Option<PathBuf>,

    #[arg(long, help = "Show which files would be written without writing them")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current version
    Get {
        #[arg(long, help = "Source version file [default: VERSION]")]
        version_file: Option<String>,
    },
    /// Check the target file carries the same version as the version file
    Validate {
        #[command(flatten)]
        target: TargetOpts,
    },
    /// Copy the version into the target file
    Sync {
        #[command(flatten)]
        target: TargetOpts,
        #[command(flatten)]
        export: ExportOpts,
    },
    /// Increment the version file (major, minor or patch)
    Bump {
        bump_type: String,
        #[arg(long, help = "Source version file [default: VERSION]")]
        version_file: Option<String>,
        #[command(flatten)]
        export: ExportOpts,
    },
    /// Sync, validate and print the git commands for a release
    Release {
        #[command(flatten)]
        target: TargetOpts,
        #[arg(long, help = "Tag message [default: Release X.Y.Z]")]
        tag_message: Option<String>,
        #[command(flatten)]
        export: ExportOpts,
    },
    /// Install pre-commit and pre-push hooks that validate the version
    SetupHooks {
        #[command(flatten)]
        export: ExportOpts,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    logging::init(level).map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let source = args.source.clone().unwrap_or_else(default_source);
    let tree = match DirTree::open(&source) {
        Ok(tree) => tree,
        Err(e) => {
            ui::display_error(&format!("Cannot open source directory: {}", e));
            std::process::exit(1);
        }
    };
    tracing::debug!(source = %tree.root().display(), "opened source tree");

    match args.command {
        Command::Get { version_file } => {
            let version_file = version_file.unwrap_or(config.version_file);
            ui::display_report(&cli::get_version(&tree, &version_file));
        }
        Command::Validate { target } => {
            ui::display_report(&cli::validate_version(&tree, &target.resolve(&config)));
        }
        Command::Sync { target, export } => {
            let target = target.resolve(&config);
            let synced = cli::sync_version(&tree, &target).unwrap_or_else(|e| fail(e));
            finish(&synced, &export)?;
        }
        Command::Bump {
            bump_type,
            version_file,
            export,
        } => {
            let version_file = version_file.unwrap_or(config.version_file);
            let bumped =
                cli::bump_version(&tree, &bump_type, &version_file).unwrap_or_else(|e| fail(e));
            ui::display_success(&format!(
                "{} is now {}",
                version_file,
                cli::get_version(&bumped, &version_file)
            ));
            finish(&bumped, &export)?;
        }
        Command::Release {
            target,
            tag_message,
            export,
        } => {
            let target = target.resolve(&config);
            let version = cli::get_version(&tree, &target.version_file);
            let tag_message = tag_message.or_else(|| config.tag_message_for(&version));

            let plan = cli::release(&tree, &target, tag_message.as_deref());
            ui::display_report(&plan.report);
            match plan.tree {
                Some(synced) => finish(&synced, &export)?,
                None => std::process::exit(1),
            }
        }
        Command::SetupHooks { export } => {
            let setup = cli::setup_git_hooks(&tree, Utc::now()).unwrap_or_else(|e| fail(e));
            ui::display_status(&format!("Detected {} project", setup.project));
            for warning in &setup.warnings {
                ui::display_setup_warning(warning);
            }
            for kind in &setup.installed {
                ui::display_success(&format!("Installed {} hook", kind.name()));
            }
            finish(&setup.tree, &export)?;
        }
    }

    Ok(())
}

/// The enclosing git work tree, or the current directory outside of one.
fn default_source() -> PathBuf {
    git2::Repository::discover(".")
        .ok()
        .and_then(|repo| repo.workdir().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn fail(error: version_sync::VersionSyncError) -> ! {
    ui::display_error(&error.to_string());
    std::process::exit(1);
}

/// Persist the staged files, or list them on a dry run.
fn finish(tree: &DirTree, opts: &ExportOpts) -> Result<()> {
    if opts.dry_run {
        ui::display_dry_run(&tree.staged());
        return Ok(());
    }

    let dest = opts
        .export
        .clone()
        .unwrap_or_else(|| tree.root().to_path_buf());
    let written = tree.export(&dest)?;
    ui::display_exported(&written);
    Ok(())
}
