//! # mztab-edit - Editing and renumbering mzTab documents
//!
//! `mztab_edit` loads an mzTab small-molecule document into memory, lets you
//! change its sample/assay metadata and quantification tables, and writes it
//! back with every `sample[n]`, `assay[n]` and `ms_run[n]` identifier
//! renumbered densely from 1.
//!
//! ## Key Features
//!
//! - **Lossless pass-through**: lines the editor does not model (title,
//!   version, CV terms, free comments, the attached `COM\tMGF` block) are
//!   re-emitted verbatim.
//!
//! - **Explicit entity graph**: samples with `key:value` attributes parsed
//!   from their descriptions, runs with locations, and assays referencing
//!   both, built in two passes so line order does not matter.
//!
//! - **Arrow-backed tables**: summary, feature and evidence sections are held
//!   as Arrow record batches of nullable strings; each `abundance_assay[n]`
//!   column stays bound to its assay through renumbering.
//!
//! - **Token-aware renumbering**: `sample[1]` is never rewritten inside
//!   `sample[10]`, and a renamed column can never be renamed twice.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mztab_edit::MzTab;
//!
//! let mut mztab = MzTab::from_file("study.mzTab")?;
//!
//! // Drop every sample from group B together with its assays and columns
//! mztab.delete("group", &["B"])?;
//! mztab.update("batch", "2")?;
//! mztab.save("study.filtered.mzTab")?;
//!
//! // One file per patient: study_patientid__P1.mzTab, ...
//! mztab.save_slices("study.mzTab", "patientid")?;
//! # Ok::<(), mztab_edit::MzTabError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`document`]: line classification into sections
//! - [`identifier`]: `kind[n]` identifiers and token-aware rewriting
//! - [`metadata`]: samples, runs and assays
//! - [`table`]: Arrow-backed section tables
//! - [`mztab`]: the loaded model, edits, renumbering and serialization
//! - [`validator`]: structural checks with a printable report

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod document;
pub mod error;
pub mod identifier;
pub mod metadata;
pub mod mztab;
pub mod table;
pub mod validator;

pub use config::FormatConfig;
pub use error::{MzTabError, Result};
pub use mztab::MzTab;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::FormatConfig;
    pub use crate::error::{MzTabError, Result};
    pub use crate::identifier::{EntityId, EntityKind};
    pub use crate::metadata::{Assay, Run, Sample};
    pub use crate::mztab::{IdRemap, MzTab, MzTabSummary, Slice, UpdateTarget};
    pub use crate::table::{SectionTable, TableKind};
    pub use crate::validator::{validate_mztab, validate_mztab_file, ValidationReport};
}
