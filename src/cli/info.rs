use anyhow::{Context, Result};
use std::path::PathBuf;

use mztab_edit::MzTab;

/// Display information about an mzTab file
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let mztab =
        MzTab::from_file(&file).with_context(|| format!("Failed to load {}", file.display()))?;
    let summary = mztab.summary_info();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
        return Ok(());
    }

    println!("mzTab File Information");
    println!("======================");
    println!("File: {}", file.display());
    println!();

    println!("Metadata:");
    println!("  Samples: {}", summary.samples);
    println!("  Assays: {}", summary.assays);
    println!("  Runs: {}", summary.runs);
    println!("  Preserved lines: {}", summary.preserved_lines);
    if summary.comment_block_lines > 0 {
        println!("  Comment block lines: {}", summary.comment_block_lines);
    }
    println!();

    if !summary.attribute_keys.is_empty() {
        println!("Sample Attributes:");
        for key in &summary.attribute_keys {
            let values = mztab.slice_values(key);
            let preview = if values.len() > 5 {
                format!("{}, ... ({} values)", values[..5].join(", "), values.len())
            } else {
                values.join(", ")
            };
            println!("  {}: {}", key, preview);
        }
        println!();
    }

    println!("Tables:");
    for table in &summary.tables {
        println!(
            "  {:8} {} rows x {} columns ({} abundance)",
            format!("{:?}", table.kind),
            table.rows,
            table.columns,
            table.abundance_columns
        );
    }

    Ok(())
}
