use serde::Serialize;

/// Section a line of an mzTab document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// `MTD\tsample[n]...`
    Samples,
    /// `MTD\tassay[n]...`
    Assays,
    /// `MTD\tms_run[n]...`
    Runs,
    /// `SMH` small molecule summary header
    SummaryHeader,
    /// `SML` small molecule summary row
    SummaryRow,
    /// `SFH` small molecule feature header
    DetailHeader,
    /// `SMF` small molecule feature row
    DetailRow,
    /// `SEH` small molecule evidence header
    EvidenceHeader,
    /// `SME` small molecule evidence row
    EvidenceRow,
    /// `COM\tMGF...` attached spectra block
    CommentBlock,
    /// Everything else, re-emitted verbatim
    Rest,
}

impl SectionKind {
    /// All kinds in classification priority order
    pub const ALL: [SectionKind; 11] = [
        SectionKind::Samples,
        SectionKind::Assays,
        SectionKind::Runs,
        SectionKind::SummaryHeader,
        SectionKind::SummaryRow,
        SectionKind::DetailHeader,
        SectionKind::DetailRow,
        SectionKind::EvidenceHeader,
        SectionKind::EvidenceRow,
        SectionKind::CommentBlock,
        SectionKind::Rest,
    ];

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Classify one line by its leading tab-delimited tokens.
    ///
    /// The first matching rule wins; a line that matches nothing is `Rest`.
    pub fn classify(line: &str) -> SectionKind {
        let mut tokens = line.split('\t');
        let first = tokens.next().unwrap_or_default();
        let second = tokens.next().unwrap_or_default();

        match first {
            "MTD" if second.starts_with("sample[") => SectionKind::Samples,
            "MTD" if second.starts_with("assay[") => SectionKind::Assays,
            "MTD" if second.starts_with("ms_run[") => SectionKind::Runs,
            "SMH" => SectionKind::SummaryHeader,
            "SML" => SectionKind::SummaryRow,
            "SFH" => SectionKind::DetailHeader,
            "SMF" => SectionKind::DetailRow,
            "SEH" => SectionKind::EvidenceHeader,
            "SME" => SectionKind::EvidenceRow,
            "COM" if second.starts_with("MGF") => SectionKind::CommentBlock,
            _ => SectionKind::Rest,
        }
    }
}
