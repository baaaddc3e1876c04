use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mztab_edit::identifier::EntityKind;
use mztab_edit::validator::{validate_mztab_file, Severity};

/// Check an mzTab file; exits with status 1 when a check fails
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    let report = validate_mztab_file(&file);
    info!(
        "{}: {} samples, {} runs, {} assays flagged",
        file.display(),
        report.flagged(EntityKind::Sample).len(),
        report.flagged(EntityKind::MsRun).len(),
        report.flagged(EntityKind::Assay).len()
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print!("{}", report.format_colored());
    }

    if report.status() == Severity::Failed {
        std::process::exit(1);
    }
    Ok(())
}
