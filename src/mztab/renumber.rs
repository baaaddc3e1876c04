use std::collections::HashMap;

use crate::identifier::{EntityId, EntityKind};
use crate::metadata::{Assay, Sample};

/// Old → new identifier maps for one serialization pass.
///
/// Samples and assays are numbered 1..N in the working set's row order.
/// Runs are numbered 1..M in the order the assays first reference them;
/// a run referenced by several assays gets one number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdRemap {
    samples: HashMap<EntityId, EntityId>,
    assays: HashMap<EntityId, EntityId>,
    runs: HashMap<EntityId, EntityId>,
    run_order: Vec<EntityId>,
}

impl IdRemap {
    /// Compute the maps for a (possibly filtered) working set
    pub fn from_working_set<'a, S, A>(samples: S, assays: A) -> Self
    where
        S: IntoIterator<Item = &'a Sample>,
        A: IntoIterator<Item = &'a Assay>,
    {
        let samples = dense(samples.into_iter().map(|s| s.id), EntityKind::Sample);

        let mut run_order = Vec::new();
        let mut assay_ids = Vec::new();
        for assay in assays {
            assay_ids.push(assay.id);
            if let Some(run) = assay.ms_run_ref {
                if !run_order.contains(&run) {
                    run_order.push(run);
                }
            }
        }

        Self {
            samples,
            assays: dense(assay_ids, EntityKind::Assay),
            runs: dense(run_order.iter().copied(), EntityKind::MsRun),
            run_order,
        }
    }

    /// New identifier for an old one of any kind
    pub fn get(&self, old: EntityId) -> Option<EntityId> {
        match old.kind() {
            EntityKind::Sample => self.samples.get(&old),
            EntityKind::Assay => self.assays.get(&old),
            EntityKind::MsRun => self.runs.get(&old),
        }
        .copied()
    }

    /// Old run identifiers in their new order
    pub fn run_order(&self) -> &[EntityId] {
        &self.run_order
    }

    /// Number of identifiers of one kind in the working set
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Sample => self.samples.len(),
            EntityKind::Assay => self.assays.len(),
            EntityKind::MsRun => self.runs.len(),
        }
    }
}

fn dense<I>(ids: I, kind: EntityKind) -> HashMap<EntityId, EntityId>
where
    I: IntoIterator<Item = EntityId>,
{
    ids.into_iter()
        .zip(1u32..)
        .map(|(old, n)| (old, EntityId::new(kind, n)))
        .collect()
}
