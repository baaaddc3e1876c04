use std::collections::HashSet;

use log::{info, warn};

use super::MzTab;
use crate::error::{MzTabError, Result};
use crate::identifier::{EntityId, EntityKind};
use crate::table::abundance_column_name;

/// Assay fields that [`MzTab::update`] can broadcast
pub const ASSAY_COLUMNS: [&str; 3] = ["sample_ref", "ms_run_ref", "ms_run_location"];

/// What an [`MzTab::update`] call changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTarget {
    /// A sample attribute, set on this many samples
    Samples(usize),
    /// An assay field, set on this many assays
    Assays(usize),
    /// The key matched neither; nothing changed
    Unmatched,
}

impl MzTab {
    /// Set a sample attribute or an assay field on every row.
    ///
    /// A sample attribute takes precedence: every sample's description is
    /// rewritten so that `key:<old>` reads `key:<value>` (or gains that
    /// segment) and the attribute is set to `value` on all samples. Otherwise,
    /// if `key` is one of [`ASSAY_COLUMNS`], the value is broadcast to every
    /// assay; `ms_run_ref` must name a known run and refreshes the cached
    /// location. An unknown key changes nothing.
    pub fn update(&mut self, key: &str, value: &str) -> Result<UpdateTarget> {
        if self.has_sample_attribute(key) {
            let separator = self.config.description_separator.clone();
            for sample in &mut self.samples {
                sample.set_attribute(key, value, &separator)?;
            }
            info!("Set sample attribute {}={} on {} samples", key, value, self.samples.len());
            return Ok(UpdateTarget::Samples(self.samples.len()));
        }

        match key {
            "sample_ref" => {
                let id = parse_value(value, EntityKind::Sample)?;
                for assay in &mut self.assays {
                    assay.sample_ref = Some(id);
                }
            }
            "ms_run_ref" => {
                let id = parse_value(value, EntityKind::MsRun)?;
                let location = self
                    .runs
                    .get(id)
                    .ok_or_else(|| MzTabError::unresolved(EntityKind::MsRun, id, "assay update"))?
                    .location
                    .clone();
                for assay in &mut self.assays {
                    assay.ms_run_ref = Some(id);
                    assay.ms_run_location = location.clone();
                }
            }
            "ms_run_location" => {
                for assay in &mut self.assays {
                    assay.ms_run_location = Some(value.to_string());
                }
            }
            _ => {
                warn!("Update key '{}' is neither a sample attribute nor an assay field", key);
                return Ok(UpdateTarget::Unmatched);
            }
        }

        info!("Set assay {}={} on {} assays", key, value, self.assays.len());
        Ok(UpdateTarget::Assays(self.assays.len()))
    }

    /// Samples whose attribute `key` is one of `values`, and the assays
    /// that reference them. `None` when no sample has the attribute.
    pub fn select<S: AsRef<str>>(
        &self,
        key: &str,
        values: &[S],
    ) -> Option<(Vec<EntityId>, Vec<EntityId>)> {
        if !self.has_sample_attribute(key) {
            return None;
        }

        let samples: Vec<EntityId> = self
            .samples
            .iter()
            .filter(|s| {
                s.attribute(key)
                    .is_some_and(|v| values.iter().any(|wanted| wanted.as_ref() == v))
            })
            .map(|s| s.id)
            .collect();

        let assays: Vec<EntityId> = self
            .assays
            .iter()
            .filter(|a| a.sample_ref.is_some_and(|s| samples.contains(&s)))
            .map(|a| a.id)
            .collect();

        Some((samples, assays))
    }

    /// Null the abundance columns of the assays measuring the selected
    /// samples in the summary and feature tables.
    ///
    /// Table shapes, samples and assays are unchanged. Returns the assays
    /// whose columns were nulled.
    pub fn nullify<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> Result<Vec<EntityId>> {
        let Some((_, assays)) = self.select(key, values) else {
            warn!("Nullify key '{}' is not a sample attribute", key);
            return Ok(Vec::new());
        };

        let columns: Vec<String> = assays.iter().map(|&id| abundance_column_name(id)).collect();
        self.summary.fill_columns(&columns, None)?;
        if let Some(detail) = self.detail.as_mut() {
            detail.fill_columns(&columns, None)?;
        }

        info!("Nullified assays: {}", join_ids(&assays));
        Ok(assays)
    }

    /// Remove the selected samples, the assays measuring them and those
    /// assays' abundance columns in the summary and feature tables.
    ///
    /// Runs stay in the lookup; unreferenced runs are simply not written.
    /// Returns the deleted samples.
    pub fn delete<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> Result<Vec<EntityId>> {
        let Some((samples, assays)) = self.select(key, values) else {
            warn!("Delete key '{}' is not a sample attribute", key);
            return Ok(Vec::new());
        };

        let columns: Vec<String> = assays.iter().map(|&id| abundance_column_name(id)).collect();
        self.summary.drop_columns(&columns)?;
        if let Some(detail) = self.detail.as_mut() {
            detail.drop_columns(&columns)?;
        }

        let sample_set: HashSet<EntityId> = samples.iter().copied().collect();
        let assay_set: HashSet<EntityId> = assays.iter().copied().collect();
        self.samples.retain(|s| !sample_set.contains(&s.id));
        self.assays.retain(|a| !assay_set.contains(&a.id));

        info!("Deleted samples: {}", join_ids(&samples));
        Ok(samples)
    }
}

fn parse_value(value: &str, kind: EntityKind) -> Result<EntityId> {
    EntityId::parse_exact(value, kind).ok_or_else(|| MzTabError::InvalidIdentifier {
        line: 0,
        token: value.to_string(),
    })
}

fn join_ids(ids: &[EntityId]) -> String {
    ids.iter()
        .map(EntityId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
