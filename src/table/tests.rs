use super::*;
use crate::document::Document;

const DOC: &str = "MTD\tmzTab-version\t2.0.0-M\n\
SMH\tSML_ID\tdatabase_identifier\tabundance_assay[1]\tabundance_assay[2]\tabundance_study_variable[1]\n\
SML\t1\tHMDB:1\t10.5\tnull\t5\n\
SML\t2\tHMDB:2\t3.0\t4.0\n\
SFH\tSMF_ID\tabundance_assay[1]\tabundance_assay[2]\n";

fn summary(doc: &Document) -> SectionTable {
    SectionTableBuilder::new(TableKind::Summary, "null")
        .build(doc)
        .unwrap()
        .unwrap()
}

#[test]
fn test_build_summary() {
    let doc = Document::parse(DOC);
    let table = summary(&doc);

    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.num_columns(), 6);
    assert_eq!(table.column_names()[0], "SMH");
    assert_eq!(table.value(0, "SMH"), Some("SML"));
    assert_eq!(table.value(0, "abundance_assay[1]"), Some("10.5"));
    // literal null token and short rows both load as nulls
    assert_eq!(table.value(0, "abundance_assay[2]"), None);
    assert_eq!(table.value(1, "abundance_study_variable[1]"), None);
    assert_eq!(table.null_count("abundance_assay[2]"), Some(1));
}

#[test]
fn test_empty_and_absent_sections() {
    let doc = Document::parse(DOC);

    let detail = SectionTableBuilder::new(TableKind::Detail, "null")
        .build(&doc)
        .unwrap()
        .unwrap();
    assert_eq!(detail.num_rows(), 0);
    assert_eq!(detail.num_columns(), 3);

    let evidence = SectionTableBuilder::new(TableKind::Evidence, "null")
        .build(&doc)
        .unwrap();
    assert!(evidence.is_none());
}

#[test]
fn test_missing_summary_is_fatal() {
    let doc = Document::parse("MTD\tmzTab-version\t2.0.0-M\n");
    let err = SectionTableBuilder::new(TableKind::Summary, "null")
        .build(&doc)
        .unwrap_err();
    assert!(matches!(err, MzTabError::MissingMandatorySection("SMH")));
}

#[test]
fn test_rows_without_header() {
    let doc = Document::parse("SMH\tSML_ID\nSME\t1\n");
    let err = SectionTableBuilder::new(TableKind::Evidence, "null")
        .build(&doc)
        .unwrap_err();
    assert!(matches!(err, MzTabError::MissingSectionHeader("SEH")));
}

#[test]
fn test_ragged_row() {
    let doc = Document::parse("SMH\tSML_ID\nSML\t1\textra\n");
    let err = SectionTableBuilder::new(TableKind::Summary, "null")
        .build(&doc)
        .unwrap_err();
    match err {
        MzTabError::RaggedRow {
            line,
            expected,
            found,
            ..
        } => {
            assert_eq!(line, 2);
            assert_eq!(expected, 2);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_quotes_are_literal() {
    let doc = Document::parse("SMH\tSML_ID\tname\nSML\t1\t\"quoted, name\"\n");
    let table = summary(&doc);
    assert_eq!(table.value(0, "name"), Some("\"quoted, name\""));
    let lines = table.to_lines("null").unwrap();
    assert_eq!(lines[1], "SML\t1\t\"quoted, name\"");
}

#[test]
fn test_abundance_columns() {
    let doc = Document::parse(DOC);
    let table = summary(&doc);
    let cols = table.abundance_columns();
    assert_eq!(
        cols,
        vec![
            ("abundance_assay[1]".to_string(), EntityId::assay(1)),
            ("abundance_assay[2]".to_string(), EntityId::assay(2)),
        ]
    );
}

#[test]
fn test_fill_and_drop_keep_shape() {
    let doc = Document::parse(DOC);
    let mut table = summary(&doc);

    let filled = table
        .fill_columns(&["abundance_assay[1]".to_string()], None)
        .unwrap();
    assert_eq!(filled, 1);
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.num_columns(), 6);
    assert_eq!(table.null_count("abundance_assay[1]"), Some(2));

    table
        .fill_columns(&["database_identifier".to_string()], Some("none"))
        .unwrap();
    assert_eq!(table.value(1, "database_identifier"), Some("none"));

    let dropped = table
        .drop_columns(&["abundance_assay[2]".to_string(), "missing".to_string()])
        .unwrap();
    assert_eq!(dropped, 1);
    assert!(!table.has_column("abundance_assay[2]"));
    assert_eq!(table.num_rows(), 2);
}

#[test]
fn test_rename_and_write() {
    let doc = Document::parse(DOC);
    let table = summary(&doc)
        .renamed(|name| Ok(name.replace("assay[1]", "assay[9]")))
        .unwrap();
    let lines = table.to_lines("null").unwrap();
    assert_eq!(
        lines,
        vec![
            "SMH\tSML_ID\tdatabase_identifier\tabundance_assay[9]\tabundance_assay[2]\tabundance_study_variable[1]",
            "SML\t1\tHMDB:1\t10.5\tnull\t5",
            "SML\t2\tHMDB:2\t3.0\t4.0\tnull",
        ]
    );
}

#[test]
fn test_repeated_header_uses_first() {
    let text = "SMH\tSML_ID\tname\n\
SML\t1\ta\n\
SMH\tSML_ID\tother\textra\n\
SML\t2\tb\n";
    let doc = Document::parse(text);
    let table = summary(&doc);
    assert_eq!(table.column_names(), vec!["SMH", "SML_ID", "name"]);
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.value(1, "name"), Some("b"));

    let out = crate::MzTab::parse(text).unwrap().to_mztab_string().unwrap();
    assert_eq!(out.lines().filter(|l| l.starts_with("SMH\t")).count(), 1);
    assert_eq!(out, "SMH\tSML_ID\tname\nSML\t1\ta\nSML\t2\tb\n");
}
