//! # Section tables
//!
//! The three bulk sections of an mzTab document (small molecule summary,
//! feature and evidence) are held as Arrow [`RecordBatch`]es of nullable
//! Utf8 columns. Column names are the header tokens verbatim, including the
//! leading `SMH`/`SFH`/`SEH` tag, so the first cell of every row is the
//! matching `SML`/`SMF`/`SME` tag.
//!
//! Cells equal to the configured null token are stored as Arrow nulls and
//! written back as that token.

mod abundance;
mod builder;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use arrow::array::{new_null_array, Array, ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use serde::Serialize;

use crate::document::SectionKind;
use crate::error::{MzTabError, Result};
use crate::identifier::EntityId;

pub use abundance::{abundance_column_name, assay_of_column, ABUNDANCE_PREFIX};
pub use builder::SectionTableBuilder;

/// Which bulk section a table was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Small molecule summary (`SMH`/`SML`), mandatory
    Summary,
    /// Small molecule feature (`SFH`/`SMF`)
    Detail,
    /// Small molecule evidence (`SEH`/`SME`)
    Evidence,
}

impl TableKind {
    /// Tag of the header line
    pub fn header_tag(&self) -> &'static str {
        match self {
            TableKind::Summary => "SMH",
            TableKind::Detail => "SFH",
            TableKind::Evidence => "SEH",
        }
    }

    /// Tag of the data lines
    pub fn row_tag(&self) -> &'static str {
        match self {
            TableKind::Summary => "SML",
            TableKind::Detail => "SMF",
            TableKind::Evidence => "SME",
        }
    }

    pub(crate) fn header_section(&self) -> SectionKind {
        match self {
            TableKind::Summary => SectionKind::SummaryHeader,
            TableKind::Detail => SectionKind::DetailHeader,
            TableKind::Evidence => SectionKind::EvidenceHeader,
        }
    }

    pub(crate) fn row_section(&self) -> SectionKind {
        match self {
            TableKind::Summary => SectionKind::SummaryRow,
            TableKind::Detail => SectionKind::DetailRow,
            TableKind::Evidence => SectionKind::EvidenceRow,
        }
    }
}

/// One bulk section held as an Arrow record batch of Utf8 columns
#[derive(Debug, Clone)]
pub struct SectionTable {
    kind: TableKind,
    batch: RecordBatch,
}

impl SectionTable {
    /// Build a table from column names and column-major cells
    pub fn from_columns(
        kind: TableKind,
        names: Vec<String>,
        columns: Vec<Vec<Option<String>>>,
        num_rows: usize,
    ) -> Result<Self> {
        let fields: Vec<Field> = names
            .into_iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();
        let arrays: Vec<ArrayRef> = columns
            .into_iter()
            .map(|cells| Arc::new(StringArray::from(cells)) as ArrayRef)
            .collect();
        let batch = new_batch(Arc::new(Schema::new(fields)), arrays, num_rows)?;
        Ok(Self { kind, batch })
    }

    /// Section this table was built from
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Underlying record batch
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Number of data rows
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Number of columns, including the leading tag column
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// True when a column with this name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.batch.schema_ref().index_of(name).is_ok()
    }

    /// Cell by row and column name; `None` for nulls and unknown columns
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.batch.schema_ref().index_of(column).ok()?;
        let array = self.strings(index).ok()?;
        (row < array.len() && !array.is_null(row)).then(|| array.value(row))
    }

    /// Number of null cells in a column
    pub fn null_count(&self, column: &str) -> Option<usize> {
        let index = self.batch.schema_ref().index_of(column).ok()?;
        Some(self.batch.column(index).null_count())
    }

    /// Abundance columns and the assays they are bound to, in column order
    pub fn abundance_columns(&self) -> Vec<(String, EntityId)> {
        self.column_names()
            .into_iter()
            .filter_map(|name| assay_of_column(name).map(|id| (name.to_string(), id)))
            .collect()
    }

    /// Replace every cell of the named columns with `value` (or null).
    ///
    /// Unknown names are ignored. Returns the number of columns filled.
    pub fn fill_columns(&mut self, names: &[String], value: Option<&str>) -> Result<usize> {
        let schema = self.batch.schema();
        let num_rows = self.num_rows();
        let mut filled = 0;
        let arrays: Vec<ArrayRef> = schema
            .fields()
            .iter()
            .zip(self.batch.columns())
            .map(|(field, array)| {
                if names.iter().any(|n| n == field.name()) {
                    filled += 1;
                    match value {
                        Some(v) => Arc::new(StringArray::from(vec![v; num_rows])) as ArrayRef,
                        None => new_null_array(&DataType::Utf8, num_rows),
                    }
                } else {
                    array.clone()
                }
            })
            .collect();
        self.batch = new_batch(schema, arrays, num_rows)?;
        Ok(filled)
    }

    /// Copy of this table without the named columns
    pub fn without_columns(&self, names: &[String]) -> Result<Self> {
        let keep: Vec<usize> = self
            .column_names()
            .iter()
            .enumerate()
            .filter(|(_, name)| !names.iter().any(|n| n == *name))
            .map(|(i, _)| i)
            .collect();
        let batch = self.batch.project(&keep)?;
        Ok(Self {
            kind: self.kind,
            batch,
        })
    }

    /// Drop the named columns in place. Returns the number dropped.
    pub fn drop_columns(&mut self, names: &[String]) -> Result<usize> {
        let before = self.num_columns();
        *self = self.without_columns(names)?;
        Ok(before - self.num_columns())
    }

    /// Copy of this table with every column name passed through `rename`
    pub fn renamed<F>(&self, mut rename: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<String>,
    {
        let fields = self
            .batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| Ok(Field::new(rename(f.name().as_str())?, DataType::Utf8, true)))
            .collect::<Result<Vec<_>>>()?;
        let batch = new_batch(
            Arc::new(Schema::new(fields)),
            self.batch.columns().to_vec(),
            self.num_rows(),
        )?;
        Ok(Self {
            kind: self.kind,
            batch,
        })
    }

    /// Header line followed by one line per row, nulls written as `null_token`
    pub fn to_lines(&self, null_token: &str) -> Result<Vec<String>> {
        let columns = (0..self.num_columns())
            .map(|i| self.strings(i))
            .collect::<Result<Vec<_>>>()?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(self.column_names())?;
        for row in 0..self.num_rows() {
            writer.write_record(columns.iter().map(|array| {
                if array.is_null(row) {
                    null_token
                } else {
                    array.value(row)
                }
            }))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| MzTabError::IoError(e.into_error()))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(text.lines().map(str::to_string).collect())
    }

    fn strings(&self, index: usize) -> Result<&StringArray> {
        self.batch
            .column(index)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| {
                MzTabError::ArrowError(ArrowError::SchemaError(format!(
                    "column {} of {} table is not Utf8",
                    index,
                    self.kind.header_tag()
                )))
            })
    }
}

fn new_batch(
    schema: Arc<Schema>,
    arrays: Vec<ArrayRef>,
    num_rows: usize,
) -> std::result::Result<RecordBatch, ArrowError> {
    let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
    RecordBatch::try_new_with_options(schema, arrays, &options)
}
