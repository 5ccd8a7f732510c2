//! Generator settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Settings that shape the generated declarations.
///
/// Deserializes from the `[generator]` table of a config file; missing keys take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Type emitted when no structural rule matches a property.
    pub unknown_type: UnknownType,
    /// Emit blocks in name order instead of document order.
    pub sort_definitions: bool,
    /// Report `$ref` targets that name no definition in the input.
    pub check_references: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            unknown_type: UnknownType::default(),
            sort_definitions: false,
            check_references: true,
        }
    }
}

/// The Unknown type marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownType {
    /// `any`
    #[default]
    Any,
    /// `unknown`
    Unknown,
}

impl UnknownType {
    /// The TypeScript keyword for this marker.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UnknownType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for UnknownType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!(
                "invalid unknown type '{other}', expected 'any' or 'unknown'"
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.unknown_type, UnknownType::Any);
        assert!(!config.sort_definitions);
        assert!(config.check_references);
    }

    #[test]
    fn test_partial_toml_table() {
        let config: GeneratorConfig = toml::from_str(r#"unknown_type = "unknown""#).unwrap();
        assert_eq!(config.unknown_type, UnknownType::Unknown);
        assert!(config.check_references);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let result = toml::from_str::<GeneratorConfig>("sort = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_type_from_str() {
        assert_eq!("any".parse::<UnknownType>().unwrap(), UnknownType::Any);
        assert_eq!(" Unknown ".parse::<UnknownType>().unwrap(), UnknownType::Unknown);
        assert!("never".parse::<UnknownType>().is_err());
    }
}
