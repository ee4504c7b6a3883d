//! Human and JSON rendering of pass reports

use std::io::{self, Write};

use colored::Colorize;
use sync_core::{ActionKind, Outcome, PassReport};

use crate::error::Result;

/// Print `report` to stdout, as one JSON line or as a coloured summary.
pub fn print(report: &PassReport, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer(&mut out, report)?;
        writeln!(out)?;
    } else {
        render(&mut out, report)?;
    }
    out.flush()?;
    Ok(())
}

pub fn render(out: &mut impl Write, report: &PassReport) -> Result<()> {
    let summary = report.summary();
    if summary.is_in_sync() {
        writeln!(out, "{} Replica is in sync.", "OK".green().bold())?;
        return Ok(());
    }

    let header = if report.dry_run {
        "DRY RUN".yellow().bold()
    } else {
        "=>".blue().bold()
    };
    writeln!(out, "{} Pass {}", header, report.pass_id.to_string().dimmed())?;

    for record in &report.records {
        let marker = match record.action.kind() {
            ActionKind::MkDir | ActionKind::CopyFile => "+".green(),
            ActionKind::UpdateFile => "~".yellow(),
            ActionKind::DeleteFile | ActionKind::DeleteDir => "-".red(),
        };
        match &record.outcome {
            Outcome::Applied | Outcome::Planned => {
                writeln!(out, "   {} {}", marker, record.action)?;
            }
            Outcome::Failed { error } => {
                writeln!(
                    out,
                    "   {} {}: {}",
                    "!".red().bold(),
                    record.action,
                    error.dimmed()
                )?;
            }
        }
    }
    for issue in &report.issues {
        writeln!(
            out,
            "   {} {}: {}",
            "?".yellow().bold(),
            issue.path.display(),
            issue.error
        )?;
    }

    writeln!(
        out,
        "{} applied, {} planned, {} failed, {} not compared",
        summary.applied, summary.planned, summary.failed, summary.issues
    )?;
    Ok(())
}
