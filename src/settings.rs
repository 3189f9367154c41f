//! Resource limits and feature switches for a parse.
//!
//! Settings can be built in code or loaded from a JSON or YAML configuration file;
//! any key left out keeps its default.
//!
//! ```
//! use simple_json_core::settings::ParserSettings;
//!
//! let settings = ParserSettings::from_yaml_str("max_depth: 8\nallow_comments: false\n").unwrap();
//! assert_eq!(settings.max_depth, 8);
//! assert!(!settings.allow_comments);
//! assert_eq!(settings.max_string_length, usize::MAX);
//! ```

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};

/// Nesting depth allowed by [`ParserSettings::default`].
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Every limit the parser enforces.
///
/// The defaults impose no limit other than a nesting depth of
/// [`DEFAULT_MAX_DEPTH`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Whether `//` and `/* */` comments are skipped like whitespace.
    pub allow_comments: bool,
    pub min_integer: i64,
    pub max_integer: i64,
    pub min_fraction: f64,
    pub max_fraction: f64,
    /// Maximum decoded string length in bytes.
    pub max_string_length: usize,
    pub max_array_length: usize,
    pub max_num_members: usize,
    /// Maximum number of nested arrays and objects, counted together.
    pub max_depth: usize,
}

impl ParserSettings {
    /// Standard JSON: no comments, otherwise the defaults.
    pub const fn strict() -> Self {
        Self {
            allow_comments: false,
            ..Self::unlimited()
        }
    }

    const fn unlimited() -> Self {
        Self {
            allow_comments: true,
            min_integer: i64::MIN,
            max_integer: i64::MAX,
            min_fraction: f64::MIN,
            max_fraction: f64::MAX,
            max_string_length: usize::MAX,
            max_array_length: usize::MAX,
            max_num_members: usize::MAX,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Loads settings from a JSON document and checks them.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a YAML document and checks them.
    pub fn from_yaml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_yaml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects bounds that no number could satisfy.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_integer > self.max_integer {
            return Err(SettingsError::InvalidBounds {
                reason: format!(
                    "min_integer {} exceeds max_integer {}",
                    self.min_integer, self.max_integer
                ),
            });
        }
        if self.min_fraction.is_nan() || self.max_fraction.is_nan() {
            return Err(SettingsError::InvalidBounds {
                reason: "fraction bounds must be numbers".to_string(),
            });
        }
        if self.min_fraction > self.max_fraction {
            return Err(SettingsError::InvalidBounds {
                reason: format!(
                    "min_fraction {} exceeds max_fraction {}",
                    self.min_fraction, self.max_fraction
                ),
            });
        }
        Ok(())
    }
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self::unlimited()
    }
}
