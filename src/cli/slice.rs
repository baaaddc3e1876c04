use anyhow::{Context, Result};
use std::path::PathBuf;

use mztab_edit::MzTab;

use super::config::Config;

/// Write one document per value of a sample attribute
pub fn run(
    input: PathBuf,
    key: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    let Some(key) = key.or(config.slice.key) else {
        anyhow::bail!("No slice key: pass --key or set [slice].key in the config file");
    };

    let mztab = MzTab::from_file_with_config(&input, config.format)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let base = output.unwrap_or_else(|| input.clone());
    let written = mztab
        .save_slices(&base, &key)
        .with_context(|| format!("Failed to write slices of {}", input.display()))?;

    if written.is_empty() {
        println!("No sample carries '{}'; nothing written", key);
    }
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
