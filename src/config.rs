//! Format-level settings shared by the loader and the serializer.

use serde::{Deserialize, Serialize};

/// Separator between `key:value` segments of a sample description
pub const DEFAULT_DESCRIPTION_SEPARATOR: &str = " | ";

/// Literal written in place of a missing cell
pub const DEFAULT_NULL_TOKEN: &str = "null";

/// Settings that control how descriptions and table cells are encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Separator between attribute segments in `sample[n]-description`
    pub description_separator: String,

    /// Token read as, and written for, a null table cell
    pub null_token: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            description_separator: DEFAULT_DESCRIPTION_SEPARATOR.to_string(),
            null_token: DEFAULT_NULL_TOKEN.to_string(),
        }
    }
}

impl FormatConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the description separator
    pub fn with_description_separator(mut self, separator: impl Into<String>) -> Self {
        self.description_separator = separator.into();
        self
    }

    /// Override the null token
    pub fn with_null_token(mut self, token: impl Into<String>) -> Self {
        self.null_token = token.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.description_separator, " | ");
        assert_eq!(config.null_token, "null");
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: FormatConfig = serde_json::from_str(r#"{"null_token": "NA"}"#).unwrap();
        assert_eq!(config.null_token, "NA");
        assert_eq!(config.description_separator, " | ");
    }
}
