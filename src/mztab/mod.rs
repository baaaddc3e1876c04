//! # The loaded document model
//!
//! [`MzTab`] ties the pieces together: the classified source lines, the
//! sample/run/assay graph and the three section tables. It is built once by
//! [`MzTab::parse`] or [`MzTab::from_file`], can be edited in place
//! ([`MzTab::update`], [`MzTab::nullify`], [`MzTab::delete`]) and is written
//! back with every identifier renumbered densely from 1
//! ([`MzTab::to_mztab_string`], [`MzTab::save`], [`MzTab::save_slices`]).
//!
//! ```rust
//! use mztab_edit::MzTab;
//!
//! let text = "MTD\tmzTab-version\t2.0.0-M\n\
//! MTD\tsample[4]-description\tgroup:A\n\
//! MTD\tms_run[9]-location\tfile:///a.mzML\n\
//! MTD\tassay[7]-sample_ref\tsample[4]\n\
//! MTD\tassay[7]-ms_run_ref\tms_run[9]\n\
//! SMH\tSML_ID\tabundance_assay[7]\n\
//! SML\t1\t12.5\n";
//!
//! let mztab = MzTab::parse(text)?;
//! let out = mztab.to_mztab_string()?;
//! assert!(out.contains("MTD\tassay[1]-sample_ref\tsample[1]"));
//! assert!(out.contains("SMH\tSML_ID\tabundance_assay[1]"));
//! # Ok::<(), mztab_edit::MzTabError>(())
//! ```

mod edit;
mod renumber;
mod serialize;
mod slice;


use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::config::FormatConfig;
use crate::document::{Document, SectionKind};
use crate::error::{MzTabError, Result};
use crate::identifier::EntityId;
use crate::metadata::{Assay, MetadataGraphBuilder, RunTable, Sample};
use crate::table::{SectionTable, SectionTableBuilder, TableKind};

pub use edit::{UpdateTarget, ASSAY_COLUMNS};
pub use renumber::IdRemap;
pub use slice::{slice_path, Slice};

/// An mzTab document loaded into memory
#[derive(Debug, Clone)]
pub struct MzTab {
    source: Option<PathBuf>,
    config: FormatConfig,
    document: Document,
    samples: Vec<Sample>,
    runs: RunTable,
    assays: Vec<Assay>,
    summary: SectionTable,
    detail: Option<SectionTable>,
    evidence: Option<SectionTable>,
}

impl MzTab {
    /// Load a document from a file with the default format settings
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with_config(path, FormatConfig::default())
    }

    /// Load a document from a file
    pub fn from_file_with_config<P: AsRef<Path>>(path: P, config: FormatConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let mut mztab = Self::from_str_with_config(&text, config)?;
        mztab.source = Some(path.to_path_buf());
        Ok(mztab)
    }

    /// Parse a document with the default format settings
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_str_with_config(text, FormatConfig::default())
    }

    /// Parse a document
    pub fn from_str_with_config(text: &str, config: FormatConfig) -> Result<Self> {
        let document = Document::parse(text);

        let summary = SectionTableBuilder::new(TableKind::Summary, &config.null_token)
            .build(&document)?
            .ok_or(MzTabError::MissingMandatorySection(
                TableKind::Summary.header_tag(),
            ))?;
        let detail =
            SectionTableBuilder::new(TableKind::Detail, &config.null_token).build(&document)?;
        let evidence =
            SectionTableBuilder::new(TableKind::Evidence, &config.null_token).build(&document)?;

        let graph = MetadataGraphBuilder::new(&config).build(&document)?;

        info!(
            "Loaded {} samples, {} assays, {} runs, {} summary rows",
            graph.samples.len(),
            graph.assays.len(),
            graph.runs.len(),
            summary.num_rows()
        );

        Ok(Self {
            source: None,
            config,
            document,
            samples: graph.samples,
            runs: graph.runs,
            assays: graph.assays,
            summary,
            detail,
            evidence,
        })
    }

    /// File the document was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Format settings in use
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Classified source lines
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Samples in model row order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Run lookup
    pub fn runs(&self) -> &RunTable {
        &self.runs
    }

    /// Assays in model row order
    pub fn assays(&self) -> &[Assay] {
        &self.assays
    }

    /// Small molecule summary table
    pub fn summary(&self) -> &SectionTable {
        &self.summary
    }

    /// Small molecule feature table, if the document has one
    pub fn detail(&self) -> Option<&SectionTable> {
        self.detail.as_ref()
    }

    /// Small molecule evidence table, if the document has one
    pub fn evidence(&self) -> Option<&SectionTable> {
        self.evidence.as_ref()
    }

    /// Present tables in output order
    pub fn tables(&self) -> impl Iterator<Item = &SectionTable> {
        std::iter::once(&self.summary)
            .chain(self.detail.as_ref())
            .chain(self.evidence.as_ref())
    }

    /// Sample by identifier
    pub fn sample(&self, id: EntityId) -> Option<&Sample> {
        self.samples.iter().find(|s| s.id == id)
    }

    /// Distinct attribute keys over all samples, in first-seen order
    pub fn attribute_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for (key, _) in self.samples.iter().flat_map(|s| s.attributes.iter()) {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        keys
    }

    /// True when at least one sample carries the attribute
    pub fn has_sample_attribute(&self, key: &str) -> bool {
        self.samples.iter().any(|s| s.has_attribute(key))
    }

    /// Overview of the model for reporting
    pub fn summary_info(&self) -> MzTabSummary {
        MzTabSummary {
            source: self.source.as_ref().map(|p| p.display().to_string()),
            samples: self.samples.len(),
            assays: self.assays.len(),
            runs: self.runs.len(),
            attribute_keys: self.attribute_keys().into_iter().map(String::from).collect(),
            tables: self
                .tables()
                .map(|t| TableSummary {
                    kind: t.kind(),
                    columns: t.num_columns(),
                    rows: t.num_rows(),
                    abundance_columns: t.abundance_columns().len(),
                })
                .collect(),
            preserved_lines: self.document.partition().count(SectionKind::Rest),
            comment_block_lines: self.document.partition().count(SectionKind::CommentBlock),
        }
    }
}

/// Serializable overview of a loaded document
#[derive(Debug, Clone, Serialize)]
pub struct MzTabSummary {
    /// Source file, if loaded from disk
    pub source: Option<String>,
    /// Number of samples
    pub samples: usize,
    /// Number of assays
    pub assays: usize,
    /// Number of runs
    pub runs: usize,
    /// Sample attribute keys in first-seen order
    pub attribute_keys: Vec<String>,
    /// Shape of each present table
    pub tables: Vec<TableSummary>,
    /// Lines re-emitted verbatim
    pub preserved_lines: usize,
    /// Lines of the attached comment block
    pub comment_block_lines: usize,
}

/// Shape of one section table
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    /// Which section
    pub kind: TableKind,
    /// Number of columns
    pub columns: usize,
    /// Number of rows
    pub rows: usize,
    /// Number of `abundance_assay[n]` columns
    pub abundance_columns: usize,
}
