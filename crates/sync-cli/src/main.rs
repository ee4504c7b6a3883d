//! syncfolders CLI
//!
//! Periodically mirrors a source folder into a replica folder.

mod cli;
mod config;
mod driver;
mod error;
mod logging;
mod report;

use clap::Parser;
use colored::Colorize;
use sync_core::{SyncTarget, TracingSink};

use cli::Cli;
use config::Settings;
use driver::{Driver, StopHandle};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;

    let target = SyncTarget::new(&settings.source, &settings.replica)?;
    settings.check_log_location(&target)?;
    logging::init(&settings.log, settings.verbose)?;
    if settings.log_is_within(target.source_root()) {
        tracing::warn!(
            log = %settings.log.display(),
            "Log file is inside the source folder and will be mirrored on every pass"
        );
    }

    target.preflight()?;
    tracing::info!(
        source = %target.source_root().display(),
        replica = %target.replica_root().display(),
        interval_secs = settings.interval.as_secs(),
        symlinks = %settings.symlinks,
        dry_run = settings.dry_run,
        "Starting synchronization"
    );

    let driver = Driver::new(&target, settings.pass_options(), settings.interval);

    if settings.once {
        let report = driver.run_once(&TracingSink)?;
        report::print(&report, settings.json)?;
        let summary = report.summary();
        if report.has_failures() {
            return Err(CliError::user(format!(
                "{} item(s) could not be synchronized",
                summary.failed + summary.issues
            )));
        }
        return Ok(());
    }

    let stop = StopHandle::new();
    stop.register_signals()?;
    driver.run(&stop, &TracingSink, |pass| {
        if settings.json || !pass.summary().is_in_sync() {
            report::print(pass, settings.json)?;
        }
        Ok(())
    });
    Ok(())
}
