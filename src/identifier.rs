//! Metadata identifiers (`sample[3]`, `assay[12]`, `ms_run[1]`) and
//! token-aware rewriting of identifiers inside metadata lines.

use std::fmt;

use serde::{Serialize, Serializer};

/// The three kinds of numbered entities that take part in renumbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// `sample[n]`
    Sample,
    /// `assay[n]`
    Assay,
    /// `ms_run[n]`
    MsRun,
}

impl EntityKind {
    /// All kinds, in the order they are tried when scanning text
    pub const ALL: [EntityKind; 3] = [EntityKind::Sample, EntityKind::Assay, EntityKind::MsRun];

    /// Literal name preceding the bracketed number
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Sample => "sample",
            EntityKind::Assay => "assay",
            EntityKind::MsRun => "ms_run",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A numbered entity identifier such as `assay[4]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    kind: EntityKind,
    number: u32,
}

impl EntityId {
    /// Create an identifier; `number` is expected to be positive
    pub fn new(kind: EntityKind, number: u32) -> Self {
        Self { kind, number }
    }

    /// `sample[number]`
    pub fn sample(number: u32) -> Self {
        Self::new(EntityKind::Sample, number)
    }

    /// `assay[number]`
    pub fn assay(number: u32) -> Self {
        Self::new(EntityKind::Assay, number)
    }

    /// `ms_run[number]`
    pub fn ms_run(number: u32) -> Self {
        Self::new(EntityKind::MsRun, number)
    }

    /// Entity kind
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Bracketed number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Parse a token that must be exactly one identifier of the given kind
    pub fn parse_exact(token: &str, kind: EntityKind) -> Option<Self> {
        match id_at(token.as_bytes(), 0) {
            Some((id, end)) if end == token.len() && id.kind == kind => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind.prefix(), self.number)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The second token of a metadata line, e.g. `sample[2]-description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataKey {
    /// Entity the line belongs to
    pub id: EntityId,
    /// Field after the `-`, `None` for the bare identifier line
    pub field: Option<String>,
}

impl MetadataKey {
    /// Parse a metadata key of the expected kind.
    ///
    /// Returns `None` when the token does not start with a well-formed
    /// identifier or when anything other than `-<field>` follows it.
    pub fn parse(token: &str, kind: EntityKind) -> Option<Self> {
        let (id, end) = id_at(token.as_bytes(), 0)?;
        if id.kind != kind {
            return None;
        }
        let rest = &token[end..];
        let field = if rest.is_empty() {
            None
        } else {
            Some(rest.strip_prefix('-')?.to_string())
        };
        Some(Self { id, field })
    }

    /// True when the line carries the given field
    pub fn is_field(&self, name: &str) -> bool {
        self.field.as_deref() == Some(name)
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Match an identifier starting exactly at `start`.
///
/// The match is rejected when the preceding byte is part of a longer name
/// (so `assay[1]` is not found inside `abundance_assay[1]`). Returns the id
/// and the byte offset just past the closing bracket.
fn id_at(bytes: &[u8], start: usize) -> Option<(EntityId, usize)> {
    if start > 0 && is_ident_byte(bytes[start - 1]) {
        return None;
    }
    let rest = &bytes[start..];
    for kind in EntityKind::ALL {
        let prefix = kind.prefix().as_bytes();
        if rest.len() <= prefix.len() || !rest.starts_with(prefix) || rest[prefix.len()] != b'[' {
            continue;
        }
        let digits_start = prefix.len() + 1;
        let digits = rest[digits_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let close = digits_start + digits;
        if digits == 0 || rest.get(close) != Some(&b']') {
            return None;
        }
        // ASCII digits only, so the slice is valid UTF-8
        let number: u32 = std::str::from_utf8(&rest[digits_start..close])
            .ok()?
            .parse()
            .ok()?;
        if number == 0 {
            return None;
        }
        return Some((EntityId::new(kind, number), start + close + 1));
    }
    None
}

/// Rewrite every identifier token in `line` through `remap`.
///
/// Identifiers are matched as whole tokens bounded by a non-identifier
/// character on the left and `]` on the right, so `sample[1]` never matches
/// inside `sample[10]` or `subsample[1]`. Identifiers for which `remap`
/// returns `None` or the same id are left as written. The line is scanned
/// once, left to right, so a replacement is never itself rewritten.
pub fn rewrite_ids<F>(line: &str, mut remap: F) -> String
where
    F: FnMut(EntityId) -> Option<EntityId>,
{
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match id_at(bytes, i) {
            Some((id, end)) => {
                if let Some(new_id) = remap(id).filter(|new_id| *new_id != id) {
                    out.push_str(&line[copied..i]);
                    out.push_str(&new_id.to_string());
                    copied = end;
                }
                i = end;
            }
            None => i += 1,
        }
    }

    out.push_str(&line[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_display_and_parse() {
        let id = EntityId::ms_run(12);
        assert_eq!(id.to_string(), "ms_run[12]");
        assert_eq!(EntityId::parse_exact("ms_run[12]", EntityKind::MsRun), Some(id));
        assert_eq!(EntityId::parse_exact("ms_run[12]", EntityKind::Assay), None);
        assert_eq!(EntityId::parse_exact("ms_run[12]x", EntityKind::MsRun), None);
        assert_eq!(EntityId::parse_exact("sample[0]", EntityKind::Sample), None);
        assert_eq!(EntityId::parse_exact("sample[]", EntityKind::Sample), None);
        assert_eq!(EntityId::parse_exact("sample[+1]", EntityKind::Sample), None);
    }

    #[test]
    fn test_metadata_key() {
        let key = MetadataKey::parse("sample[3]-description", EntityKind::Sample).unwrap();
        assert_eq!(key.id, EntityId::sample(3));
        assert!(key.is_field("description"));

        let bare = MetadataKey::parse("assay[1]", EntityKind::Assay).unwrap();
        assert_eq!(bare.field, None);

        let custom = MetadataKey::parse("sample[1]-custom[2]", EntityKind::Sample).unwrap();
        assert_eq!(custom.field.as_deref(), Some("custom[2]"));

        assert!(MetadataKey::parse("sample[1]x", EntityKind::Sample).is_none());
        assert!(MetadataKey::parse("sample_processing[1]", EntityKind::Sample).is_none());
    }

    #[test]
    fn test_rewrite_is_token_aware() {
        let line = "MTD\tassay[1]-sample_ref\tsample[1]\tsample[10]\tabundance_assay[1]";
        let out = rewrite_ids(line, |id| match (id.kind(), id.number()) {
            (EntityKind::Sample, 1) => Some(EntityId::sample(7)),
            (EntityKind::Assay, 1) => Some(EntityId::assay(2)),
            _ => None,
        });
        assert_eq!(
            out,
            "MTD\tassay[2]-sample_ref\tsample[7]\tsample[10]\tabundance_assay[1]"
        );
    }

    #[test]
    fn test_rewrite_swaps_without_collision() {
        let line = "assay[1],assay[2]";
        let out = rewrite_ids(line, |id| {
            Some(EntityId::assay(if id.number() == 1 { 2 } else { 1 }))
        });
        assert_eq!(out, "assay[2],assay[1]");
    }

    #[test]
    fn test_rewrite_keeps_non_ascii() {
        let line = "MTD\tsample[1]-description\tpatiënt µ sample[1]";
        let out = rewrite_ids(line, |_| Some(EntityId::sample(4)));
        assert_eq!(out, "MTD\tsample[4]-description\tpatiënt µ sample[4]");
    }

    proptest! {
        #[test]
        fn test_identity_rewrite_is_lossless(line in "[ -~\\t]{0,80}") {
            prop_assert_eq!(rewrite_ids(&line, Some), line);
        }

        #[test]
        fn test_prefix_numbers_never_collide(a in 1u32..50, b in 50u32..5000) {
            let line = format!("sample[{}] sample[{}]", a, b);
            let out = rewrite_ids(&line, |id| (id.number() == a).then(|| EntityId::sample(9999)));
            prop_assert_eq!(out, format!("sample[9999] sample[{}]", b));
        }
    }
}
