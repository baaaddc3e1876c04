use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

#[cfg(feature = "colorized_output")]
use console::style;
use serde::Serialize;

use crate::identifier::{EntityId, EntityKind};
use crate::table::TableKind;

/// Part of the document a check covers. Reports list checks grouped by scope,
/// in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Reading and classifying the text
    Document,
    /// `sample[n]` entries
    Samples,
    /// `ms_run[n]` entries
    Runs,
    /// `assay[n]` entries
    Assays,
    /// Summary, detail and evidence tables
    Tables,
    /// Writing the renumbered document
    Output,
}

impl Scope {
    const ALL: [Scope; 6] = [
        Scope::Document,
        Scope::Samples,
        Scope::Runs,
        Scope::Assays,
        Scope::Tables,
        Scope::Output,
    ];

    fn title(&self) -> &'static str {
        match self {
            Scope::Document => "Document",
            Scope::Samples => "Samples",
            Scope::Runs => "Runs",
            Scope::Assays => "Assays",
            Scope::Tables => "Tables",
            Scope::Output => "Output",
        }
    }
}

/// Outcome of a check, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Nothing found
    Ok,
    /// Usable, but something will be dropped or looks unintended
    Warning,
    /// Saving would fail or lose data
    Failed,
}

/// What a finding points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Subject {
    /// A numbered entity
    Entity {
        /// The entity
        id: EntityId,
    },
    /// A column of one of the tables
    Column {
        /// Table holding the column
        table: TableKind,
        /// Column name as written in the header
        name: String,
    },
    /// The document as a whole
    Document,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Entity { id } => write!(f, "{}", id),
            Subject::Column { table, name } => write!(f, "{} ({})", name, table.header_tag()),
            Subject::Document => f.write_str("document"),
        }
    }
}

/// One offending item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Where the problem is
    pub subject: Subject,
    /// What is wrong with it
    pub detail: String,
}

impl Finding {
    pub(crate) fn entity(id: EntityId, detail: impl Into<String>) -> Self {
        Self {
            subject: Subject::Entity { id },
            detail: detail.into(),
        }
    }

    pub(crate) fn column(table: TableKind, name: &str, detail: impl Into<String>) -> Self {
        Self {
            subject: Subject::Column {
                table,
                name: name.to_string(),
            },
            detail: detail.into(),
        }
    }

    pub(crate) fn document(detail: impl Into<String>) -> Self {
        Self {
            subject: Subject::Document,
            detail: detail.into(),
        }
    }
}

/// A named check with everything it flagged
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    /// Part of the document covered
    pub scope: Scope,
    /// What was checked
    pub name: &'static str,
    /// `Ok` when nothing was found, otherwise the check's level
    pub status: Severity,
    /// Flagged items in document order
    pub findings: Vec<Finding>,
}

impl Check {
    /// A check whose findings, if any, are reported at `level`
    pub(crate) fn new(
        scope: Scope,
        name: &'static str,
        level: Severity,
        findings: Vec<Finding>,
    ) -> Self {
        let status = if findings.is_empty() {
            Severity::Ok
        } else {
            level
        };
        Self {
            scope,
            name,
            status,
            findings,
        }
    }
}

/// Cross-reference report for one mzTab document
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// Document the checks ran against (a path, or `<memory>`)
    pub source: String,
    /// Check results in the order they ran
    pub checks: Vec<Check>,
}

impl ValidationReport {
    /// Create an empty report for a document
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            checks: Vec::new(),
        }
    }

    /// Append a check result
    pub fn add(&mut self, check: Check) {
        self.checks.push(check);
    }

    /// Number of checks that ended with `status`
    pub fn count(&self, status: Severity) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    /// True when any check failed
    pub fn has_failures(&self) -> bool {
        self.count(Severity::Failed) > 0
    }

    /// True when any check warned
    pub fn has_warnings(&self) -> bool {
        self.count(Severity::Warning) > 0
    }

    /// Worst status across all checks
    pub fn status(&self) -> Severity {
        self.checks
            .iter()
            .map(|c| c.status)
            .max()
            .unwrap_or(Severity::Ok)
    }

    /// Distinct entities of one kind named by any finding, sorted
    pub fn flagged(&self, kind: EntityKind) -> Vec<EntityId> {
        let ids: BTreeSet<EntityId> = self
            .checks
            .iter()
            .flat_map(|c| &c.findings)
            .filter_map(|f| match &f.subject {
                Subject::Entity { id } if id.kind() == kind => Some(*id),
                _ => None,
            })
            .collect();
        ids.into_iter().collect()
    }

    fn render(&self, paint: fn(Tone, &str) -> String) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {}\n",
            paint(Tone::Title, "mzTab validation:"),
            self.source
        );

        for scope in Scope::ALL {
            let mut checks = self.checks.iter().filter(|c| c.scope == scope).peekable();
            if checks.peek().is_none() {
                continue;
            }
            let _ = writeln!(out, "{}", paint(Tone::Heading, scope.title()));
            for check in checks {
                let tone = Tone::of(check.status);
                let _ = write!(out, "  {} {}", paint(tone, tone.symbol()), check.name);
                if check.findings.is_empty() {
                    out.push('\n');
                } else {
                    let _ = writeln!(out, " ({})", check.findings.len());
                }
                for finding in &check.findings {
                    let _ = writeln!(out, "      {}: {}", finding.subject, finding.detail);
                }
            }
        }

        let _ = writeln!(
            out,
            "\n{} passed, {} warnings, {} failed; flagged {}, {}, {}",
            self.count(Severity::Ok),
            self.count(Severity::Warning),
            self.count(Severity::Failed),
            counted(self.flagged(EntityKind::Sample).len(), "sample"),
            counted(self.flagged(EntityKind::MsRun).len(), "run"),
            counted(self.flagged(EntityKind::Assay).len(), "assay"),
        );
        let status = self.status();
        let verdict = match status {
            Severity::Ok => "PASSED",
            Severity::Warning => "PASSED with warnings",
            Severity::Failed => "FAILED",
        };
        let _ = writeln!(out, "{}", paint(Tone::of(status), verdict));
        out
    }

    /// Render with terminal colors when `colorized_output` is on, otherwise
    /// the same text as [`fmt::Display`]
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            self.render(paint_console)
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(paint_plain))
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Title,
    Heading,
    Good,
    Warn,
    Bad,
}

impl Tone {
    fn of(status: Severity) -> Self {
        match status {
            Severity::Ok => Tone::Good,
            Severity::Warning => Tone::Warn,
            Severity::Failed => Tone::Bad,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Tone::Warn => "⚠",
            Tone::Bad => "✗",
            _ => "✓",
        }
    }
}

fn paint_plain(_: Tone, text: &str) -> String {
    text.to_string()
}

#[cfg(feature = "colorized_output")]
fn paint_console(tone: Tone, text: &str) -> String {
    let styled = style(text);
    match tone {
        Tone::Title => styled.bold().cyan(),
        Tone::Heading => styled.bold(),
        Tone::Good => styled.green(),
        Tone::Warn => styled.yellow().bold(),
        Tone::Bad => styled.red().bold(),
    }
    .to_string()
}

fn counted(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
