use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::serialize::{Serializer, WorkingSet};
use super::MzTab;
use crate::error::{MzTabError, Result};
use crate::identifier::EntityId;
use crate::table::{abundance_column_name, SectionTable};

/// One rendered slice of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    /// Attribute value shared by every sample in the slice
    pub value: String,
    /// Serialized document
    pub text: String,
    /// Samples written
    pub sample_count: usize,
    /// Assays written
    pub assay_count: usize,
}

impl MzTab {
    /// Distinct values of a sample attribute in first-seen sample order
    pub fn slice_values(&self, key: &str) -> Vec<&str> {
        let mut values: Vec<&str> = Vec::new();
        for value in self.samples.iter().filter_map(|s| s.attribute(key)) {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        values
    }

    /// Render one independently renumbered document per value of `key`.
    ///
    /// Each slice keeps the samples with that value, the assays measuring
    /// them and the tables minus every other assay's abundance columns.
    /// Samples without the attribute belong to no slice.
    pub fn render_slices(&self, key: &str) -> Result<Vec<Slice>> {
        if !self.has_sample_attribute(key) {
            return Err(MzTabError::SliceKeyNotFound(key.to_string()));
        }

        let unlabeled = self.samples.iter().filter(|s| !s.has_attribute(key)).count();
        if unlabeled > 0 {
            warn!("{} samples have no '{}' attribute and are left out of every slice", unlabeled, key);
        }

        let values = self.slice_values(key);

        #[cfg(feature = "parallel")]
        let slices = values
            .par_iter()
            .map(|value| self.render_slice(key, value))
            .collect::<Result<Vec<_>>>()?;

        #[cfg(not(feature = "parallel"))]
        let slices = values
            .iter()
            .map(|value| self.render_slice(key, value))
            .collect::<Result<Vec<_>>>()?;

        Ok(slices)
    }

    fn render_slice(&self, key: &str, value: &str) -> Result<Slice> {
        let samples: Vec<_> = self
            .samples
            .iter()
            .filter(|s| s.attribute(key) == Some(value))
            .collect();
        let sample_ids: HashSet<EntityId> = samples.iter().map(|s| s.id).collect();
        let assays: Vec<_> = self
            .assays
            .iter()
            .filter(|a| a.sample_ref.is_some_and(|id| sample_ids.contains(&id)))
            .collect();

        let dropped: Vec<String> = self
            .assays
            .iter()
            .filter(|a| !assays.iter().any(|kept| kept.id == a.id))
            .map(|a| abundance_column_name(a.id))
            .collect();
        let restrict = |table: &SectionTable| -> Result<SectionTable> { table.without_columns(&dropped) };

        let set = WorkingSet {
            summary: Cow::Owned(restrict(&self.summary)?),
            detail: self.detail.as_ref().map(restrict).transpose()?.map(Cow::Owned),
            evidence: self.evidence.as_ref().map(restrict).transpose()?.map(Cow::Owned),
            samples,
            assays,
        };
        let sample_count = set.samples.len();
        let assay_count = set.assays.len();
        let text = Serializer::new(self, set).render()?;

        Ok(Slice {
            value: value.to_string(),
            text,
            sample_count,
            assay_count,
        })
    }

    /// Write one file per value of sample attribute `key`, named by
    /// [`slice_path`]. An unknown key writes nothing and returns no paths.
    pub fn save_slices<P: AsRef<Path>>(&self, path: P, key: &str) -> Result<Vec<PathBuf>> {
        let slices = match self.render_slices(key) {
            Ok(slices) => slices,
            Err(MzTabError::SliceKeyNotFound(key)) => {
                warn!("Slice key '{}' not found in samples, nothing written", key);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut written = Vec::with_capacity(slices.len());
        for slice in slices {
            let out = slice_path(path.as_ref(), key, &slice.value);
            std::fs::write(&out, &slice.text)?;
            info!(
                "Wrote slice {}={} ({} samples, {} assays) to {}",
                key,
                slice.value,
                slice.sample_count,
                slice.assay_count,
                out.display()
            );
            written.push(out);
        }
        Ok(written)
    }
}

/// Output path of one slice: `_<key>__<value>` goes before the extension.
///
/// ```rust
/// use std::path::Path;
/// use mztab_edit::mztab::slice_path;
///
/// let out = slice_path(Path::new("out/study.mzTab"), "patientid", "P1");
/// assert_eq!(out, Path::new("out/study_patientid__P1.mzTab"));
/// ```
pub fn slice_path(path: &Path, key: &str, value: &str) -> PathBuf {
    let value: String = value
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{}_{}__{}", stem, key, value);
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}
