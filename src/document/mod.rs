//! # Line classification
//!
//! An mzTab document is a flat list of tab-delimited lines whose first token
//! (and, for metadata, second token) decides which section they belong to.
//! [`Document`] keeps the original lines untouched and records, per
//! [`SectionKind`], the ordered indices of the lines in that section. All
//! later stages read lines through this partition; the original lines also
//! serve as templates when the document is written back out.

mod section;


pub use section::SectionKind;

/// Ordered line indices per section kind
#[derive(Debug, Clone, Default)]
pub struct LinePartition {
    buckets: [Vec<usize>; SectionKind::ALL.len()],
}

impl LinePartition {
    /// Classify every line. Each index lands in exactly one bucket.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut partition = Self::default();
        for (i, line) in lines.iter().enumerate() {
            let kind = SectionKind::classify(line.as_ref());
            partition.buckets[kind.index()].push(i);
        }
        partition
    }

    /// Indices of the lines in a section, in document order
    pub fn indices(&self, kind: SectionKind) -> &[usize] {
        &self.buckets[kind.index()]
    }

    /// Number of lines in a section
    pub fn count(&self, kind: SectionKind) -> usize {
        self.buckets[kind.index()].len()
    }

    /// True when a section has no lines
    pub fn is_empty(&self, kind: SectionKind) -> bool {
        self.buckets[kind.index()].is_empty()
    }
}

/// Immutable source lines of a loaded document plus their partition
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
    partition: LinePartition,
}

impl Document {
    /// Split text into lines and classify them.
    ///
    /// Lines are split on `\n` with a trailing `\r` removed; a final newline
    /// does not produce an extra empty line.
    pub fn parse(text: &str) -> Self {
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect()
        };
        let partition = LinePartition::from_lines(&lines);
        log::debug!(
            "Classified {} lines ({} sample, {} run, {} assay, {} rest)",
            lines.len(),
            partition.count(SectionKind::Samples),
            partition.count(SectionKind::Runs),
            partition.count(SectionKind::Assays),
            partition.count(SectionKind::Rest),
        );
        Self { lines, partition }
    }

    /// All source lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line by index, `None` past the end
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Line partition
    pub fn partition(&self) -> &LinePartition {
        &self.partition
    }

    /// `(index, line)` pairs of a section, in document order
    pub fn section(&self, kind: SectionKind) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.partition
            .indices(kind)
            .iter()
            .map(move |&i| (i, self.lines[i].as_str()))
    }
}
