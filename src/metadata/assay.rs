use std::collections::HashMap;

use serde::Serialize;

use crate::identifier::EntityId;

/// An `ms_run[n]` entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    /// Identifier as read from the document
    pub id: EntityId,

    /// File location (`ms_run[n]-location`)
    pub location: Option<String>,
}

/// Lookup of runs by identifier, kept in first-appearance order
#[derive(Debug, Clone, Default)]
pub struct RunTable {
    runs: Vec<Run>,
    index: HashMap<EntityId, usize>,
}

impl RunTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a run if it is not known yet and return it
    pub fn entry(&mut self, id: EntityId) -> &mut Run {
        let next = self.runs.len();
        let slot = *self.index.entry(id).or_insert(next);
        if slot == next {
            self.runs.push(Run { id, location: None });
        }
        &mut self.runs[slot]
    }

    /// Run by identifier
    pub fn get(&self, id: EntityId) -> Option<&Run> {
        self.index.get(&id).map(|&i| &self.runs[i])
    }

    /// True when the run is known
    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    /// All runs in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter()
    }

    /// Number of runs
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// True when no run is known
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// An `assay[n]` entity and its resolved references
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assay {
    /// Identifier as read from the document
    pub id: EntityId,

    /// Sample measured by this assay (`assay[n]-sample_ref`)
    pub sample_ref: Option<EntityId>,

    /// Run the assay was acquired in (`assay[n]-ms_run_ref`)
    pub ms_run_ref: Option<EntityId>,

    /// Location of the referenced run, resolved at load
    pub ms_run_location: Option<String>,
}

impl Assay {
    /// Create an assay with no references
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            sample_ref: None,
            ms_run_ref: None,
            ms_run_location: None,
        }
    }
}
