use std::borrow::Cow;
use std::path::Path;

use log::{debug, info, warn};

use super::{IdRemap, MzTab};
use crate::document::SectionKind;
use crate::error::{MzTabError, Result};
use crate::identifier::{rewrite_ids, EntityId, EntityKind, MetadataKey};
use crate::metadata::{Assay, Sample};
use crate::table::{abundance_column_name, assay_of_column, SectionTable};

/// The part of a model written by one serialization pass
#[derive(Debug, Clone)]
pub(crate) struct WorkingSet<'a> {
    pub samples: Vec<&'a Sample>,
    pub assays: Vec<&'a Assay>,
    pub summary: Cow<'a, SectionTable>,
    pub detail: Option<Cow<'a, SectionTable>>,
    pub evidence: Option<Cow<'a, SectionTable>>,
}

impl<'a> WorkingSet<'a> {
    /// Everything currently in the model
    pub fn full(mztab: &'a MzTab) -> Self {
        Self {
            samples: mztab.samples.iter().collect(),
            assays: mztab.assays.iter().collect(),
            summary: Cow::Borrowed(&mztab.summary),
            detail: mztab.detail.as_ref().map(Cow::Borrowed),
            evidence: mztab.evidence.as_ref().map(Cow::Borrowed),
        }
    }
}

/// Writes a working set back to mzTab text using the source lines as templates
pub(crate) struct Serializer<'a> {
    mztab: &'a MzTab,
    set: WorkingSet<'a>,
    remap: IdRemap,
}

impl<'a> Serializer<'a> {
    pub fn new(mztab: &'a MzTab, set: WorkingSet<'a>) -> Self {
        let remap =
            IdRemap::from_working_set(set.samples.iter().copied(), set.assays.iter().copied());
        Self { mztab, set, remap }
    }

    /// Render the whole document
    pub fn render(&self) -> Result<String> {
        self.check_assay_references()?;

        let doc = &self.mztab.document;
        let mut lines: Vec<String> = doc
            .section(SectionKind::Rest)
            .map(|(_, line)| line.to_string())
            .collect();

        lines.push(String::new());
        self.write_samples(&mut lines);
        lines.push(String::new());
        self.write_runs(&mut lines);
        lines.push(String::new());
        self.write_assays(&mut lines);
        lines.push(String::new());

        lines.extend(self.table_lines(&self.set.summary)?);
        for table in [&self.set.detail, &self.set.evidence].into_iter().flatten() {
            lines.push(String::new());
            lines.extend(self.table_lines(table)?);
        }

        lines.push(String::new());
        lines.extend(
            doc.section(SectionKind::CommentBlock)
                .map(|(_, line)| line.to_string()),
        );

        let lines = collapse_blank_lines(lines);
        debug!(
            "Rendered {} lines ({} samples, {} runs, {} assays)",
            lines.len(),
            self.remap.len(EntityKind::Sample),
            self.remap.len(EntityKind::MsRun),
            self.remap.len(EntityKind::Assay)
        );

        let mut text = lines.join("\n");
        text.push('\n');
        Ok(text)
    }

    fn check_assay_references(&self) -> Result<()> {
        for assay in &self.set.assays {
            match assay.sample_ref {
                Some(sample) if self.remap.get(sample).is_none() => {
                    return Err(MzTabError::unresolved(
                        EntityKind::Sample,
                        sample,
                        format!("{}-sample_ref", assay.id),
                    ));
                }
                None => warn!("{} has no sample_ref", assay.id),
                _ => {}
            }
        }
        Ok(())
    }

    /// Re-emit a template line under the entity's new id.
    ///
    /// Only the key token is rewritten; values are copied as written even
    /// when they mention other identifiers.
    fn rekey(&self, line: &str, old: EntityId) -> String {
        let new = self.new_id(old);
        let mut tokens = line.splitn(3, '\t');
        let (Some(tag), Some(key)) = (tokens.next(), tokens.next()) else {
            return line.to_string();
        };
        let mut out = format!("{}\t{}", tag, rewrite_ids(key, |id| (id == old).then_some(new)));
        if let Some(value) = tokens.next() {
            out.push('\t');
            out.push_str(value);
        }
        out
    }

    /// Template lines of one entity: `(field, line)` in document order
    fn templates(
        &self,
        section: SectionKind,
        kind: EntityKind,
        id: EntityId,
    ) -> impl Iterator<Item = (Option<String>, &'a str)> + '_ {
        self.mztab.document.section(section).filter_map(move |(_, line)| {
            let token = line.split('\t').nth(1)?;
            let key = MetadataKey::parse(token, kind)?;
            (key.id == id).then_some((key.field, line))
        })
    }

    fn new_id(&self, old: EntityId) -> EntityId {
        self.remap.get(old).unwrap_or(old)
    }

    fn write_samples(&self, lines: &mut Vec<String>) {
        for sample in &self.set.samples {
            let new_id = self.new_id(sample.id);
            let mut wrote_description = false;

            for (field, line) in self.templates(SectionKind::Samples, EntityKind::Sample, sample.id)
            {
                if field.as_deref() == Some("description") {
                    if let (Some(description), false) = (&sample.description, wrote_description) {
                        lines.push(description_line(new_id, description));
                        wrote_description = true;
                    }
                } else {
                    lines.push(self.rekey(line, sample.id));
                }
            }

            if let (Some(description), false) = (&sample.description, wrote_description) {
                lines.push(description_line(new_id, description));
            }
        }
    }

    fn write_runs(&self, lines: &mut Vec<String>) {
        for &run in self.remap.run_order() {
            lines.extend(
                self.templates(SectionKind::Runs, EntityKind::MsRun, run)
                    .map(|(_, line)| self.rekey(line, run)),
            );
        }
    }

    fn write_assays(&self, lines: &mut Vec<String>) {
        for assay in &self.set.assays {
            let new_id = self.new_id(assay.id);
            let sample_ref = assay.sample_ref.map(|s| self.new_id(s));
            let run_ref = assay.ms_run_ref.map(|r| self.new_id(r));
            let mut wrote_sample = false;
            let mut wrote_run = false;

            for (field, line) in self.templates(SectionKind::Assays, EntityKind::Assay, assay.id) {
                match (field.as_deref(), sample_ref, run_ref) {
                    (Some("sample_ref"), Some(sample), _) if !wrote_sample => {
                        lines.push(reference_line(new_id, "sample_ref", sample));
                        wrote_sample = true;
                    }
                    (Some("ms_run_ref"), _, Some(run)) if !wrote_run => {
                        lines.push(reference_line(new_id, "ms_run_ref", run));
                        wrote_run = true;
                    }
                    (Some("sample_ref" | "ms_run_ref"), _, _) => {}
                    _ => lines.push(self.rekey(line, assay.id)),
                }
            }

            if let (Some(sample), false) = (sample_ref, wrote_sample) {
                lines.push(reference_line(new_id, "sample_ref", sample));
            }
            if let (Some(run), false) = (run_ref, wrote_run) {
                lines.push(reference_line(new_id, "ms_run_ref", run));
            }
        }
    }

    /// Header and rows with abundance columns re-projected onto new assay ids
    fn table_lines(&self, table: &SectionTable) -> Result<Vec<String>> {
        let tag = table.kind().header_tag();
        let projected = table.renamed(|name| match assay_of_column(name) {
            Some(old) => self
                .remap
                .get(old)
                .map(abundance_column_name)
                .ok_or_else(|| {
                    MzTabError::unresolved(
                        EntityKind::Assay,
                        old,
                        format!("column {} of the {} table", name, tag),
                    )
                }),
            None => Ok(name.to_string()),
        })?;
        projected.to_lines(&self.mztab.config.null_token)
    }
}

fn description_line(id: EntityId, description: &str) -> String {
    format!("MTD\t{}-description\t{}", id, description)
}

fn reference_line(id: EntityId, field: &str, target: EntityId) -> String {
    format!("MTD\t{}-{}\t{}", id, field, target)
}

/// Collapse runs of empty lines to one and trim empty lines at both ends
fn collapse_blank_lines(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_empty() && out.last().map_or(true, |prev| prev.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out
}

impl MzTab {
    /// Identifier maps the next [`MzTab::to_mztab_string`] will apply
    pub fn renumbering(&self) -> IdRemap {
        IdRemap::from_working_set(&self.samples, &self.assays)
    }

    /// Serialize the whole model with all identifiers renumbered
    pub fn to_mztab_string(&self) -> Result<String> {
        Serializer::new(self, WorkingSet::full(self)).render()
    }

    /// Serialize the whole model to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_mztab_string()?;
        std::fs::write(path, text)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}
