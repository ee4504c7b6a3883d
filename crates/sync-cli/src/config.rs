//! Settings resolution: command line over config file over defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sync_core::{PassOptions, SymlinkPolicy, SyncTarget};
use sync_fs::ConfigStore;
use sync_fs::path::canonicalize_lenient;

use crate::cli::Cli;
use crate::error::{CliError, Result};

pub const DEFAULT_SOURCE: &str = "source";
pub const DEFAULT_REPLICA: &str = "replica";
pub const DEFAULT_LOG: &str = "syncfolders.log";
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Settings read from a `--config` file.
///
/// Every field is optional. Relative paths are taken relative to the
/// directory holding the config file.
///
/// ```toml
/// source = "/data/photos"
/// replica = "/backup/photos"
/// log = "photos-sync.log"
/// interval = 30
/// symlinks = "follow"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    pub source: Option<PathBuf>,
    pub replica: Option<PathBuf>,
    pub log: Option<PathBuf>,
    pub interval: Option<u64>,
    pub symlinks: Option<SymlinkPolicy>,
}

impl MirrorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Self = ConfigStore::new().load(path)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        for path in [&mut self.source, &mut self.replica, &mut self.log]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: PathBuf,
    pub replica: PathBuf,
    pub log: PathBuf,
    pub interval: Duration,
    pub symlinks: SymlinkPolicy,
    pub dry_run: bool,
    pub once: bool,
    pub json: bool,
    pub verbose: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => MirrorConfig::load(path)?,
            None => MirrorConfig::default(),
        };
        Self::merge(cli, file)
    }

    fn merge(cli: &Cli, file: MirrorConfig) -> Result<Self> {
        let interval = cli
            .interval
            .or(file.interval)
            .unwrap_or(DEFAULT_INTERVAL_SECS);
        if interval == 0 {
            return Err(CliError::user("interval must be at least 1 second"));
        }

        Ok(Self {
            source: pick(&cli.source, file.source, DEFAULT_SOURCE),
            replica: pick(&cli.replica, file.replica, DEFAULT_REPLICA),
            log: pick(&cli.log, file.log, DEFAULT_LOG),
            interval: Duration::from_secs(interval),
            symlinks: cli.symlinks.or(file.symlinks).unwrap_or_default(),
            dry_run: cli.dry_run,
            once: cli.once,
            json: cli.json,
            verbose: cli.verbose,
        })
    }

    pub fn pass_options(&self) -> PassOptions {
        PassOptions {
            dry_run: self.dry_run,
            symlinks: self.symlinks,
        }
    }

    /// Reject a log file the replica would delete on the next pass.
    pub fn check_log_location(&self, target: &SyncTarget) -> Result<()> {
        if self.log_is_within(target.replica_root()) {
            return Err(CliError::user(format!(
                "log file {} is inside the replica folder and would be deleted",
                self.log.display()
            )));
        }
        Ok(())
    }

    pub fn log_is_within(&self, root: &Path) -> bool {
        canonicalize_lenient(&self.log)
            .map(|log| log.starts_with(root))
            .unwrap_or(false)
    }
}

fn pick(flag: &Option<PathBuf>, file: Option<PathBuf>, default: &str) -> PathBuf {
    flag.clone()
        .or(file)
        .unwrap_or_else(|| PathBuf::from(default))
}
