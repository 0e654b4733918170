use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use verbump_manifest::{SyncOptions, SyncReport, apply_to_manifests, ensure_in_sync, read_versions};

use crate::config::{self, Config};

/// Bump the minor version in every configured manifest.
///
/// With no flags, the manifests of a Tauri project are bumped:
/// `src-tauri/tauri.conf.json`, `Cargo.toml` and `package.json`.
#[derive(Clone, Debug, Parser)]
#[command(name = "verbump", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Project root. Defaults to the nearest directory holding `verbump.toml`,
    /// else the current directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Configuration file. Defaults to `verbump.toml` under the root.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the planned bumps without writing any file.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Fail before writing when the manifests disagree on the current version.
    #[arg(long)]
    pub require_sync: bool,

    /// Print each manifest's current version and exit; fails when they disagree.
    #[arg(long, conflicts_with_all = ["dry_run", "require_sync"])]
    pub check: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl App {
    pub fn run(self) -> Result<()> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let root = self
            .root
            .clone()
            .unwrap_or_else(|| config::discover_root(&cwd));

        let config_path = match &self.config {
            Some(path) if !path.is_file() => bail!("config file {} not found", path.display()),
            Some(path) => path.clone(),
            None => root.join(config::CONFIG_FILE),
        };
        let config = Config::load(&config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?;
        if config.manifests.is_empty() {
            bail!("no manifests configured in {}", config_path.display());
        }
        tracing::debug!(root = %root.display(), manifests = config.manifests.len(), "resolved project");

        if self.check {
            return check(&root, &config);
        }

        let options = SyncOptions {
            dry_run:      self.dry_run,
            require_sync: self.require_sync || config.require_sync,
        };
        let report = apply_to_manifests(&root, &config.manifests, &options)
            .context("failed to bump manifest versions")?;

        if report.dry_run {
            for entry in &report.entries {
                println!("{}", entry);
            }
        }
        println!("{}", summary(&report));
        Ok(())
    }
}

fn check(root: &Path, config: &Config) -> Result<()> {
    let versions = read_versions(root, &config.manifests).context("failed to read manifest versions")?;
    for v in &versions {
        println!("{}: {}", v.path.display(), v.version);
    }
    ensure_in_sync(&versions)?;
    Ok(())
}

/// The one-line confirmation printed after a run.
pub fn summary(report: &SyncReport) -> String {
    let versions = report
        .new_versions()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    if report.dry_run {
        format!("inc ver dry run: {}", versions)
    } else {
        format!("inc ver success: {}", versions)
    }
}
