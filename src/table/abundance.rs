use crate::identifier::{EntityId, EntityKind};

/// Prefix shared by all per-assay quantification columns
pub const ABUNDANCE_PREFIX: &str = "abundance_";

/// Assay bound to an abundance column, if the name is exactly
/// `abundance_assay[n]`.
///
/// Study-variable columns (`abundance_study_variable[n]`,
/// `abundance_variation_study_variable[n]`) are not bound to an assay.
pub fn assay_of_column(name: &str) -> Option<EntityId> {
    name.strip_prefix(ABUNDANCE_PREFIX)
        .and_then(|rest| EntityId::parse_exact(rest, EntityKind::Assay))
}

/// Column name bound to an assay
pub fn abundance_column_name(assay: EntityId) -> String {
    format!("{}{}", ABUNDANCE_PREFIX, assay)
}
