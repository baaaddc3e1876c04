use serde::Serialize;

use crate::error::{MzTabError, Result};
use crate::identifier::EntityId;

/// A `sample[n]` entity with attributes parsed from its description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    /// Identifier as read from the document
    pub id: EntityId,

    /// Free-text description (`sample[n]-description`)
    pub description: Option<String>,

    /// `key:value` attributes from the description, in order of appearance
    pub attributes: Vec<(String, String)>,
}

impl Sample {
    /// Create a sample with no description
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            description: None,
            attributes: Vec::new(),
        }
    }

    /// Create a sample from a description, deriving its attributes
    pub fn with_description(id: EntityId, description: &str, separator: &str) -> Result<Self> {
        Ok(Self {
            id,
            attributes: parse_attributes(id, description, separator)?,
            description: Some(description.to_string()),
        })
    }

    /// Attribute value by key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True when the description carries the attribute
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }

    /// Set an attribute and rewrite the description to match.
    ///
    /// Every `key:<old>` segment is replaced by `key:<value>`; other segments
    /// are kept byte for byte. When the key is not present the segment is
    /// appended (or becomes the description when there was none).
    pub fn set_attribute(&mut self, key: &str, value: &str, separator: &str) -> Result<()> {
        let splits_segment = !separator.is_empty() && value.contains(separator);
        if key.is_empty() || key.contains(':') || value.contains(':') || splits_segment {
            return Err(MzTabError::MalformedAttribute {
                sample: self.id.to_string(),
                segment: format!("{}:{}", key, value),
            });
        }

        let segment = format!("{}:{}", key, value);
        let description = match self.description.take() {
            Some(desc) if !desc.is_empty() => {
                let mut replaced = false;
                let parts: Vec<String> = desc
                    .split(separator)
                    .map(|part| match part.split_once(':') {
                        Some((k, _)) if k == key => {
                            replaced = true;
                            segment.clone()
                        }
                        _ => part.to_string(),
                    })
                    .collect();
                let mut rebuilt = parts.join(separator);
                if !replaced {
                    rebuilt.push_str(separator);
                    rebuilt.push_str(&segment);
                }
                rebuilt
            }
            _ => segment,
        };

        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
        self.description = Some(description);
        Ok(())
    }
}

/// Parse `key:value` segments out of a description.
///
/// Empty segments and segments without `:` are free text and skipped. A
/// segment with more than one `:` cannot be split unambiguously and is an
/// error. A repeated key keeps its first position and its last value.
pub fn parse_attributes(
    sample: EntityId,
    description: &str,
    separator: &str,
) -> Result<Vec<(String, String)>> {
    let mut attributes: Vec<(String, String)> = Vec::new();

    for segment in description.split(separator) {
        if segment.is_empty() || !segment.contains(':') {
            continue;
        }
        let mut parts = segment.split(':');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MzTabError::MalformedAttribute {
                sample: sample.to_string(),
                segment: segment.to_string(),
            });
        };

        match attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => attributes.push((key.to_string(), value.to_string())),
        }
    }

    Ok(attributes)
}
