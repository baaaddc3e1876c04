//! # mztab-edit
//!
//! A command-line tool for editing, renumbering and slicing mzTab documents.
//!
//! ## Usage
//!
//! ```bash
//! # Overview of a document
//! mztab-edit info study.mzTab
//!
//! # Drop group B, set a batch attribute, write a renumbered copy
//! mztab-edit edit study.mzTab filtered.mzTab --delete group=B --update batch=2
//!
//! # One file per patient
//! mztab-edit slice study.mzTab --key patientid
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    dispatch(cli)
}
