use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use log::debug;

use super::{Assay, RunTable, Sample};
use crate::config::FormatConfig;
use crate::document::{Document, SectionKind};
use crate::error::{MzTabError, Result};
use crate::identifier::{EntityId, EntityKind, MetadataKey};

/// Samples, runs and assays with their cross-references resolved
#[derive(Debug, Clone, Default)]
pub struct MetadataGraph {
    /// Samples in model row order (sorted by description, one per id)
    pub samples: Vec<Sample>,
    /// Runs in first-appearance order
    pub runs: RunTable,
    /// Assays in first-appearance order
    pub assays: Vec<Assay>,
}

/// Parses the sample, run and assay metadata lines of a document
#[derive(Debug, Clone)]
pub struct MetadataGraphBuilder<'a> {
    config: &'a FormatConfig,
}

impl<'a> MetadataGraphBuilder<'a> {
    /// Create a builder using the given format settings
    pub fn new(config: &'a FormatConfig) -> Self {
        Self { config }
    }

    /// Build the whole graph: samples, then runs, then assays
    pub fn build(&self, doc: &Document) -> Result<MetadataGraph> {
        let samples = self.build_samples(doc)?;
        let runs = self.build_runs(doc)?;
        let assays = self.build_assays(doc, &runs)?;
        Ok(MetadataGraph {
            samples,
            runs,
            assays,
        })
    }

    /// Parse sample lines into one [`Sample`] per identifier.
    ///
    /// Every line contributes a row: `-description` lines carry their
    /// description and attributes, all other lines an undescribed row. Rows
    /// are stably sorted by description (undescribed rows last) and the first
    /// row per identifier is kept, so the sample order of the model is the
    /// description order.
    pub fn build_samples(&self, doc: &Document) -> Result<Vec<Sample>> {
        let mut rows = Vec::new();

        for (index, line) in doc.section(SectionKind::Samples) {
            let mut tokens = line.split('\t').skip(1);
            let key = parse_key(tokens.next(), EntityKind::Sample, index)?;

            if key.is_field("description") {
                let description = tokens.next().unwrap_or_default();
                rows.push(Sample::with_description(
                    key.id,
                    description,
                    &self.config.description_separator,
                )?);
            } else {
                rows.push(Sample::new(key.id));
            }
        }

        rows.sort_by(|a, b| description_order(&a.description, &b.description));

        let total = rows.len();
        let mut seen = HashSet::new();
        rows.retain(|sample| seen.insert(sample.id));
        debug!(
            "Parsed {} samples from {} sample rows",
            rows.len(),
            total
        );

        Ok(rows)
    }

    /// Collect every run mentioned on a run line; `-location` sets (and a
    /// later one overwrites) the location.
    pub fn build_runs(&self, doc: &Document) -> Result<RunTable> {
        let mut runs = RunTable::new();

        for (index, line) in doc.section(SectionKind::Runs) {
            let mut tokens = line.split('\t').skip(1);
            let key = parse_key(tokens.next(), EntityKind::MsRun, index)?;
            let run = runs.entry(key.id);
            if key.is_field("location") {
                run.location = Some(tokens.next().unwrap_or_default().to_string());
            }
        }

        debug!("Parsed {} runs", runs.len());
        Ok(runs)
    }

    /// Parse assay lines against an already complete run table.
    ///
    /// Any assay line allocates the assay on first sight. `-ms_run_ref`
    /// must name a known run.
    pub fn build_assays(&self, doc: &Document, runs: &RunTable) -> Result<Vec<Assay>> {
        let mut assays: Vec<Assay> = Vec::new();
        let mut positions: HashMap<EntityId, usize> = HashMap::new();

        for (index, line) in doc.section(SectionKind::Assays) {
            let mut tokens = line.split('\t').skip(1);
            let key = parse_key(tokens.next(), EntityKind::Assay, index)?;

            let position = *positions.entry(key.id).or_insert_with(|| {
                assays.push(Assay::new(key.id));
                assays.len() - 1
            });
            let assay = &mut assays[position];

            match key.field.as_deref() {
                Some("sample_ref") => {
                    let value = tokens.next().unwrap_or_default();
                    assay.sample_ref = Some(parse_ref(value, EntityKind::Sample, index)?);
                }
                Some("ms_run_ref") => {
                    let value = tokens.next().unwrap_or_default();
                    let run_id = parse_ref(value, EntityKind::MsRun, index)?;
                    let run = runs.get(run_id).ok_or_else(|| {
                        MzTabError::unresolved(
                            EntityKind::MsRun,
                            run_id,
                            format!("{}-ms_run_ref on line {}", key.id, index + 1),
                        )
                    })?;
                    assay.ms_run_ref = Some(run_id);
                    assay.ms_run_location = run.location.clone();
                }
                _ => {}
            }
        }

        debug!("Parsed {} assays", assays.len());
        Ok(assays)
    }
}

fn parse_key(token: Option<&str>, kind: EntityKind, index: usize) -> Result<MetadataKey> {
    let token = token.unwrap_or_default();
    MetadataKey::parse(token, kind).ok_or_else(|| MzTabError::InvalidIdentifier {
        line: index + 1,
        token: token.to_string(),
    })
}

fn parse_ref(value: &str, kind: EntityKind, index: usize) -> Result<EntityId> {
    EntityId::parse_exact(value.trim(), kind).ok_or_else(|| MzTabError::InvalidIdentifier {
        line: index + 1,
        token: value.to_string(),
    })
}

/// Ascending by description with undescribed rows last
fn description_order(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
