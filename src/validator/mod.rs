//! # Structural validation
//!
//! Cross-reference checks over a loaded [`MzTab`]. Loading already rejects
//! malformed identifiers and attributes, unknown runs and ragged tables; the
//! checks here look for the problems a load accepts but a save would trip
//! over (dangling sample references, orphaned abundance columns) and for
//! entities nothing refers to.
//!
//! ```rust
//! use mztab_edit::MzTab;
//! use mztab_edit::validator::validate_mztab;
//!
//! let mztab = MzTab::parse("MTD\tsample[1]-description\tgroup:A\nSMH\tSML_ID\n")?;
//! let report = validate_mztab(&mztab);
//! assert!(!report.has_failures());
//! # Ok::<(), mztab_edit::MzTabError>(())
//! ```

use std::collections::HashSet;
use std::path::Path;

use log::debug;

pub use report::{Check, Finding, Scope, Severity, Subject, ValidationReport};

mod report;

use crate::identifier::EntityId;
use crate::MzTab;

const LOADS: &str = "Document loads";

/// Load a file and validate it. A load error becomes a failed check.
pub fn validate_mztab_file(path: &Path) -> ValidationReport {
    match MzTab::from_file(path) {
        Ok(mztab) => validate_mztab(&mztab),
        Err(e) => {
            let mut report = ValidationReport::new(path.display().to_string());
            report.add(Check::new(
                Scope::Document,
                LOADS,
                Severity::Failed,
                vec![Finding::document(e.to_string())],
            ));
            report
        }
    }
}

/// Run every check against a loaded document
pub fn validate_mztab(mztab: &MzTab) -> ValidationReport {
    let source = mztab
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string());
    let mut report = ValidationReport::new(source);
    report.add(Check::new(Scope::Document, LOADS, Severity::Failed, Vec::new()));

    report.add(unmeasured_samples(mztab));
    report.add(unused_runs(mztab));
    report.add(dangling_sample_refs(mztab));
    report.add(missing_refs(mztab));
    report.add(orphan_columns(mztab));
    report.add(unquantified_assays(mztab));
    report.add(serialization(mztab));

    debug!(
        "Validation of {}: {} passed, {} warnings, {} failed",
        report.source,
        report.count(Severity::Ok),
        report.count(Severity::Warning),
        report.count(Severity::Failed)
    );
    report
}

fn unmeasured_samples(mztab: &MzTab) -> Check {
    let measured: HashSet<EntityId> = mztab.assays().iter().filter_map(|a| a.sample_ref).collect();
    let findings = mztab
        .samples()
        .iter()
        .filter(|s| !measured.contains(&s.id))
        .map(|s| Finding::entity(s.id, "no assay refers to it"))
        .collect();
    Check::new(Scope::Samples, "Samples measured by assays", Severity::Warning, findings)
}

fn unused_runs(mztab: &MzTab) -> Check {
    let used: HashSet<EntityId> = mztab.assays().iter().filter_map(|a| a.ms_run_ref).collect();
    let findings = mztab
        .runs()
        .iter()
        .filter(|r| !used.contains(&r.id))
        .map(|r| Finding::entity(r.id, "not referenced by an assay, dropped on save"))
        .collect();
    Check::new(Scope::Runs, "Runs referenced by assays", Severity::Warning, findings)
}

fn dangling_sample_refs(mztab: &MzTab) -> Check {
    let known: HashSet<EntityId> = mztab.samples().iter().map(|s| s.id).collect();
    let findings = mztab
        .assays()
        .iter()
        .filter_map(|a| {
            let sample = a.sample_ref.filter(|s| !known.contains(s))?;
            Some(Finding::entity(a.id, format!("{} is not defined", sample)))
        })
        .collect();
    Check::new(Scope::Assays, "Sample references resolve", Severity::Failed, findings)
}

fn missing_refs(mztab: &MzTab) -> Check {
    let findings = mztab
        .assays()
        .iter()
        .flat_map(|a| {
            let sample = a.sample_ref.is_none().then(|| Finding::entity(a.id, "no sample_ref"));
            let run = a.ms_run_ref.is_none().then(|| Finding::entity(a.id, "no ms_run_ref"));
            sample.into_iter().chain(run)
        })
        .collect();
    Check::new(Scope::Assays, "Sample and run references present", Severity::Warning, findings)
}

fn orphan_columns(mztab: &MzTab) -> Check {
    let known: HashSet<EntityId> = mztab.assays().iter().map(|a| a.id).collect();
    let findings = mztab
        .tables()
        .flat_map(|table| {
            table
                .abundance_columns()
                .into_iter()
                .filter(|(_, assay)| !known.contains(assay))
                .map(move |(name, assay)| {
                    Finding::column(table.kind(), &name, format!("{} is not defined", assay))
                })
        })
        .collect();
    Check::new(Scope::Tables, "Abundance columns bound to assays", Severity::Failed, findings)
}

fn unquantified_assays(mztab: &MzTab) -> Check {
    let summary = mztab.summary();
    let bound: HashSet<EntityId> = summary
        .abundance_columns()
        .into_iter()
        .map(|(_, id)| id)
        .collect();
    let detail = format!("no abundance column in {}", summary.kind().header_tag());
    let findings = mztab
        .assays()
        .iter()
        .filter(|a| !bound.contains(&a.id))
        .map(|a| Finding::entity(a.id, detail.as_str()))
        .collect();
    Check::new(Scope::Tables, "Assays quantified in summary", Severity::Warning, findings)
}

fn serialization(mztab: &MzTab) -> Check {
    let findings = match mztab.to_mztab_string() {
        Ok(_) => Vec::new(),
        Err(e) => vec![Finding::document(e.to_string())],
    };
    Check::new(Scope::Output, "Document serializes", Severity::Failed, findings)
}
