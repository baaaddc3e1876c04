//! Integration tests for mztab-edit
//!
//! These tests run the full load → edit → save pipeline through files on disk.

use std::fs;

use mztab_edit::identifier::EntityId;
use mztab_edit::validator::validate_mztab_file;
use mztab_edit::{FormatConfig, MzTab, MzTabError};
use tempfile::tempdir;

const STUDY: &str = "MTD\tmzTab-version\t2.0.0-M\n\
MTD\tmzTab-ID\tMTBLS-test\n\
MTD\tsample_processing[1]\t[MS, MS:1000000, pooled, ]\n\
MTD\tsample[1]\tpatient one, visit one\n\
MTD\tsample[1]-description\tpatientid:P1 | visit:1 | group:case\n\
MTD\tsample[2]\tpatient one, visit two\n\
MTD\tsample[2]-description\tpatientid:P1 | visit:2 | group:case\n\
MTD\tsample[3]\tpatient two, visit one\n\
MTD\tsample[3]-description\tpatientid:P2 | visit:1 | group:control\n\
MTD\tsample[4]\tblank\n\
MTD\tms_run[1]-location\tfile:///data/run1.mzML\n\
MTD\tms_run[1]-format\t[MS, MS:1000584, mzML file, ]\n\
MTD\tms_run[2]-location\tfile:///data/run2.mzML\n\
MTD\tms_run[3]-location\tfile:///data/run3.mzML\n\
MTD\tassay[1]\tassay one\n\
MTD\tassay[1]-sample_ref\tsample[1]\n\
MTD\tassay[1]-ms_run_ref\tms_run[1]\n\
MTD\tassay[2]-sample_ref\tsample[2]\n\
MTD\tassay[2]-ms_run_ref\tms_run[2]\n\
MTD\tassay[3]-sample_ref\tsample[3]\n\
MTD\tassay[3]-ms_run_ref\tms_run[3]\n\
\n\
SMH\tSML_ID\tdatabase_identifier\tabundance_assay[1]\tabundance_assay[2]\tabundance_assay[3]\n\
SML\t1\tHMDB:0000001\t1.1\t1.2\t1.3\n\
SML\t2\tHMDB:0000002\tnull\t2.2\t2.3\n\
\n\
SFH\tSMF_ID\tabundance_assay[1]\tabundance_assay[2]\tabundance_assay[3]\n\
SMF\t1\t10\t20\t30\n\
\n\
SEH\tSME_ID\tevidence_input_id\n\
SME\t1\tfeature 1\n\
\n\
COM\tMGF\tBEGIN IONS\n\
COM\tMGF\tEND IONS\n";

/// Test the complete load-save cycle through files
#[test]
fn test_file_roundtrip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("study.mzTab");
    let output = dir.path().join("copy.mzTab");
    fs::write(&input, STUDY).unwrap();

    let mztab = MzTab::from_file(&input).unwrap();
    assert_eq!(mztab.source(), Some(input.as_path()));
    assert_eq!(mztab.samples().len(), 4);
    assert_eq!(mztab.assays().len(), 3);
    assert_eq!(mztab.runs().len(), 3);
    assert_eq!(mztab.evidence().map(|t| t.num_rows()), Some(1));
    mztab.save(&output).unwrap();

    let copy = MzTab::from_file(&output).unwrap();
    assert_eq!(copy.samples().len(), 4);
    assert_eq!(copy.assays().len(), 3);
    assert_eq!(copy.summary().value(1, "abundance_assay[1]"), None);
    assert_eq!(copy.summary().value(1, "abundance_assay[3]"), Some("2.3"));

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("MTD\tsample_processing[1]\t[MS, MS:1000000, pooled, ]\n"));
    assert!(text.contains("MTD\tms_run[1]-format\t[MS, MS:1000584, mzML file, ]\n"));
    assert!(text.ends_with("COM\tMGF\tBEGIN IONS\nCOM\tMGF\tEND IONS\n"));
}

/// Deleting a group removes its samples, assays, runs and columns
#[test]
fn test_delete_closure() {
    let mut mztab = MzTab::parse(STUDY).unwrap();
    mztab.delete("group", &["case"]).unwrap();
    let out = mztab.to_mztab_string().unwrap();
    let reloaded = MzTab::parse(&out).unwrap();

    // the control sample and the undescribed blank survive
    assert_eq!(reloaded.samples().len(), 2);
    assert_eq!(reloaded.assays().len(), 1);
    assert_eq!(reloaded.runs().len(), 1);
    assert!(out.contains("MTD\tms_run[1]-location\tfile:///data/run3.mzML\n"));
    assert!(!out.contains("run1.mzML"));
    assert!(!out.contains("ms_run[1]-format"));

    for table in reloaded.tables() {
        for (_, assay) in table.abundance_columns() {
            assert!(reloaded.assays().iter().any(|a| a.id == assay));
        }
    }
    assert_eq!(
        reloaded.summary().column_names(),
        vec!["SMH", "SML_ID", "database_identifier", "abundance_assay[1]"]
    );
    assert_eq!(reloaded.summary().value(0, "abundance_assay[1]"), Some("1.3"));
    assert_eq!(reloaded.detail().unwrap().value(0, "abundance_assay[1]"), Some("30"));
    // evidence has no abundance columns and is written unchanged
    assert!(out.contains("SEH\tSME_ID\tevidence_input_id\nSME\t1\tfeature 1\n"));
}

/// One file per patient, each renumbered from 1
#[test]
fn test_save_slices() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("study.mzTab");
    let mztab = MzTab::parse(STUDY).unwrap();

    let written = mztab.save_slices(&base, "patientid").unwrap();
    assert_eq!(
        written,
        vec![
            dir.path().join("study_patientid__P1.mzTab"),
            dir.path().join("study_patientid__P2.mzTab"),
        ]
    );

    let p1 = MzTab::from_file(&written[0]).unwrap();
    assert_eq!(p1.samples().len(), 2);
    assert_eq!(p1.assays().len(), 2);
    assert_eq!(
        p1.summary().column_names(),
        vec![
            "SMH",
            "SML_ID",
            "database_identifier",
            "abundance_assay[1]",
            "abundance_assay[2]"
        ]
    );
    assert_eq!(p1.summary().value(0, "abundance_assay[2]"), Some("1.2"));

    let p2 = MzTab::from_file(&written[1]).unwrap();
    assert_eq!(p2.samples().len(), 1);
    assert_eq!(p2.samples()[0].attribute("group"), Some("control"));
    assert_eq!(p2.samples()[0].id, EntityId::sample(1));
    assert_eq!(p2.summary().value(1, "abundance_assay[1]"), Some("2.3"));

    // every described sample lands in exactly one slice
    let total: usize = [&p1, &p2].iter().map(|m| m.samples().len()).sum();
    let labeled = mztab
        .samples()
        .iter()
        .filter(|s| s.has_attribute("patientid"))
        .count();
    assert_eq!(total, labeled);
}

/// An unknown slice key writes nothing and still succeeds
#[test]
fn test_save_slices_unknown_key() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("study.mzTab");
    let mztab = MzTab::parse(STUDY).unwrap();

    let written = mztab.save_slices(&base, "tissue").unwrap();
    assert!(written.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// Windows line endings load like Unix ones
#[test]
fn test_crlf_input() {
    let crlf = STUDY.replace('\n', "\r\n");
    let unix = MzTab::parse(STUDY).unwrap().to_mztab_string().unwrap();
    let windows = MzTab::parse(&crlf).unwrap().to_mztab_string().unwrap();
    assert_eq!(unix, windows);
}

/// A custom separator and null token are honored in both directions
#[test]
fn test_custom_format() {
    let text = "MTD\tsample[1]-description\tgroup=A;group:A;age:3\n\
SMH\tSML_ID\tabundance_assay[1]\n\
SML\t1\tNA\n";
    let config = FormatConfig::new()
        .with_description_separator(";")
        .with_null_token("NA");
    let mut mztab = MzTab::from_str_with_config(text, config).unwrap();

    // "group=A" has no colon and is free text
    assert_eq!(mztab.samples()[0].attribute("group"), Some("A"));
    assert_eq!(mztab.summary().value(0, "abundance_assay[1]"), None);

    mztab.update("age", "4").unwrap();
    let out = mztab.to_mztab_string().unwrap();
    assert!(out.contains("MTD\tsample[1]-description\tgroup=A;group:A;age:4\n"));
    assert!(out.contains("SML\t1\tNA\n"));
}

/// Structural problems surface as typed errors
#[test]
fn test_load_errors() {
    let no_summary = "MTD\tmzTab-version\t2.0.0-M\n";
    assert!(matches!(
        MzTab::parse(no_summary).unwrap_err(),
        MzTabError::MissingMandatorySection("SMH")
    ));

    let ragged = "SMH\tSML_ID\nSML\t1\textra\n";
    assert!(matches!(
        MzTab::parse(ragged).unwrap_err(),
        MzTabError::RaggedRow { line: 2, expected: 2, found: 3, .. }
    ));

    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.mzTab");
    assert!(matches!(
        MzTab::from_file(&missing).unwrap_err(),
        MzTabError::IoError(_)
    ));
}

/// The validator reads files and reports warnings without failing
#[test]
fn test_validate_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("study.mzTab");
    fs::write(&path, STUDY).unwrap();

    let report = validate_mztab_file(&path);
    assert!(!report.has_failures());
    // sample[4] has no assay
    assert!(report.has_warnings());
    assert!(report.to_string().contains("sample[4]"));
}
