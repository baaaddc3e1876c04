//! Error types for loading, editing and saving mzTab documents.

use crate::identifier::EntityKind;

/// Errors that can occur while loading, editing or saving an mzTab document
#[derive(Debug, thiserror::Error)]
pub enum MzTabError {
    /// I/O error reading or writing a document
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// TSV tokenization error in a table section
    #[error("TSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Arrow error while building or reshaping a section table
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// A reference to a sample, run or assay that does not exist
    #[error("Unresolved {kind} reference {id}: {context}")]
    StructuralReference {
        /// Kind of the entity that could not be found
        kind: EntityKind,
        /// Identifier as written in the document
        id: String,
        /// Where the dangling reference was found
        context: String,
    },

    /// A sample description segment that is not a single `key:value` pair
    #[error("Malformed attribute '{segment}' in description of {sample}")]
    MalformedAttribute {
        /// Sample whose description carries the segment
        sample: String,
        /// Offending segment
        segment: String,
    },

    /// A section every document must carry is missing
    #[error("Missing mandatory section: {0}")]
    MissingMandatorySection(&'static str),

    /// Data rows of an optional section appear without their header line
    #[error("Section {0} has data rows but no header line")]
    MissingSectionHeader(&'static str),

    /// A data row carries more cells than its header declares
    #[error("Row on line {line} of section {section} has {found} cells, header has {expected}")]
    RaggedRow {
        /// Header tag of the section
        section: &'static str,
        /// 1-based line number in the source document
        line: usize,
        /// Number of header columns
        expected: usize,
        /// Number of cells in the row
        found: usize,
    },

    /// A metadata identifier that is not `<entity>[<positive integer>]`
    #[error("Invalid identifier '{token}' on line {line}")]
    InvalidIdentifier {
        /// 1-based line number in the source document (0 when not from a line)
        line: usize,
        /// Offending token
        token: String,
    },

    /// Slicing requested on an attribute no sample carries
    #[error("Slice key not found in samples: {0}")]
    SliceKeyNotFound(String),
}

impl MzTabError {
    pub(crate) fn unresolved(
        kind: EntityKind,
        id: impl ToString,
        context: impl Into<String>,
    ) -> Self {
        MzTabError::StructuralReference {
            kind,
            id: id.to_string(),
            context: context.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MzTabError>;
