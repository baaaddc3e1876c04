//! TOML configuration file support.
//!
//! Edits that are applied routinely can live in a config file instead of on
//! the command line:
//!
//! ```toml
//! # mztab-edit.toml
//! [format]
//! description_separator = " | "
//! null_token = "null"
//!
//! [slice]
//! key = "patientid"
//!
//! [[edits]]
//! op = "delete"
//! key = "group"
//! values = ["B"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mztab_edit::FormatConfig;

/// Root configuration structure for mztab-edit.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Description and null-cell encoding.
    #[serde(default)]
    pub format: FormatConfig,

    /// Defaults for the slice command.
    #[serde(default)]
    pub slice: SliceConfig,

    /// Edits applied, in order, before any given on the command line.
    #[serde(default)]
    pub edits: Vec<EditStep>,
}

/// Configuration for the slice command.
#[derive(Debug, Default, Deserialize)]
pub struct SliceConfig {
    /// Sample attribute to slice on when `--key` is not given.
    pub key: Option<String>,
}

/// One configured edit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    /// Set a sample attribute or assay field.
    Update { key: String, value: String },
    /// Null the abundance columns of the matching samples' assays.
    Nullify { key: String, values: Vec<String> },
    /// Remove the matching samples and their assays.
    Delete { key: String, values: Vec<String> },
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
