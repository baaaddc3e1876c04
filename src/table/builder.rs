use log::{debug, warn};

use super::{SectionTable, TableKind};
use crate::document::Document;
use crate::error::{MzTabError, Result};

/// Builds a [`SectionTable`] from the header and data lines of one section
#[derive(Debug, Clone)]
pub struct SectionTableBuilder<'a> {
    kind: TableKind,
    null_token: &'a str,
}

impl<'a> SectionTableBuilder<'a> {
    /// Create a builder for one section
    pub fn new(kind: TableKind, null_token: &'a str) -> Self {
        Self { kind, null_token }
    }

    /// Build the table, or `None` when the section has no header line.
    ///
    /// The summary section is mandatory and yields
    /// [`MzTabError::MissingMandatorySection`] instead of `None`.
    pub fn build(&self, doc: &Document) -> Result<Option<SectionTable>> {
        let headers: Vec<(usize, &str)> = doc.section(self.kind.header_section()).collect();
        let rows: Vec<(usize, &str)> = doc.section(self.kind.row_section()).collect();

        let Some(&(header_index, header)) = headers.first() else {
            return match self.kind {
                TableKind::Summary => Err(MzTabError::MissingMandatorySection(
                    self.kind.header_tag(),
                )),
                _ if !rows.is_empty() => {
                    Err(MzTabError::MissingSectionHeader(self.kind.header_tag()))
                }
                _ => Ok(None),
            };
        };

        if headers.len() > 1 {
            warn!(
                "{} section has {} header lines; using the one on line {}",
                self.kind.header_tag(),
                headers.len(),
                header_index + 1
            );
        }

        let mut text = String::from(header);
        for (_, line) in &rows {
            text.push('\n');
            text.push_str(line);
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(text.as_bytes());

        let names: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut columns: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(rows.len()); names.len()];

        for (record, &(line_index, _)) in reader.records().zip(&rows) {
            let record = record?;
            if record.len() > names.len() {
                return Err(MzTabError::RaggedRow {
                    section: self.kind.header_tag(),
                    line: line_index + 1,
                    expected: names.len(),
                    found: record.len(),
                });
            }
            for (i, column) in columns.iter_mut().enumerate() {
                let cell = record.get(i).filter(|cell| *cell != self.null_token);
                column.push(cell.map(str::to_string));
            }
        }

        debug!(
            "Built {} table: {} columns, {} rows",
            self.kind.header_tag(),
            names.len(),
            rows.len()
        );

        SectionTable::from_columns(self.kind, names, columns, rows.len()).map(Some)
    }
}
