use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mztab_edit::mztab::UpdateTarget;
use mztab_edit::MzTab;

use super::config::{Config, EditStep};
use super::Selection;

/// Apply configured and command-line edits, then save
pub fn run(
    input: PathBuf,
    output: PathBuf,
    updates: Vec<(String, String)>,
    nullifies: Vec<Selection>,
    deletes: Vec<Selection>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    let mut mztab = MzTab::from_file_with_config(&input, config.format.clone())
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let steps = config
        .edits
        .into_iter()
        .chain(updates.into_iter().map(|(key, value)| EditStep::Update { key, value }))
        .chain(nullifies.into_iter().map(|s| EditStep::Nullify {
            key: s.key,
            values: s.values,
        }))
        .chain(deletes.into_iter().map(|s| EditStep::Delete {
            key: s.key,
            values: s.values,
        }));

    for step in steps {
        apply(&mut mztab, &step)?;
    }

    mztab
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} ({} samples, {} assays)",
        output.display(),
        mztab.samples().len(),
        mztab.assays().len()
    );
    Ok(())
}

fn apply(mztab: &mut MzTab, step: &EditStep) -> Result<()> {
    match step {
        EditStep::Update { key, value } => {
            let target = mztab
                .update(key, value)
                .with_context(|| format!("Failed to update {}={}", key, value))?;
            match target {
                UpdateTarget::Samples(n) => info!("update {}: {} samples", key, n),
                UpdateTarget::Assays(n) => info!("update {}: {} assays", key, n),
                UpdateTarget::Unmatched => {}
            }
        }
        EditStep::Nullify { key, values } => {
            let assays = mztab
                .nullify(key, values.as_slice())
                .with_context(|| format!("Failed to nullify {}={}", key, values.join(",")))?;
            info!("nullify {}: {} assays", key, assays.len());
        }
        EditStep::Delete { key, values } => {
            let samples = mztab
                .delete(key, values.as_slice())
                .with_context(|| format!("Failed to delete {}={}", key, values.join(",")))?;
            info!("delete {}: {} samples", key, samples.len());
        }
    }
    Ok(())
}
