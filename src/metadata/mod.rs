//! # Sample, run and assay metadata
//!
//! The `MTD` lines for `sample[n]`, `ms_run[n]` and `assay[n]` are parsed
//! into entities with resolved cross-references:
//!
//! - a sample carries its description and the `key:value` attributes
//!   parsed from it,
//! - a run carries its file location,
//! - an assay points at one sample and one run, and caches the run location.
//!
//! Runs are collected in a first pass over the whole document, so assays
//! may reference runs declared anywhere in the file.

mod assay;
mod builder;
mod sample;


pub use assay::{Assay, Run, RunTable};
pub use builder::{MetadataGraph, MetadataGraphBuilder};
pub use sample::{parse_attributes, Sample};
