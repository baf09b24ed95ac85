//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InsurefinError, Result};

/// Main configuration for insurefin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsurefinConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Export configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Run the exhaustive amount scanner (noisy).
    pub include_all_amounts: bool,

    /// Characters of context kept on each side of a pattern match.
    pub context_radius: usize,

    /// Multiplier applied to keyword context scores.
    pub context_penalty: f64,

    /// Flat confidence for exhaustive amount matches.
    pub generic_confidence: f64,

    /// Minimum confidence counted as high confidence in the summary.
    pub high_confidence_threshold: f64,

    /// Minimum confidence for a value to enter summary totals.
    pub summary_confidence_threshold: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            include_all_amounts: false,
            context_radius: 50,
            context_penalty: 0.8,
            generic_confidence: 0.5,
            high_confidence_threshold: 0.8,
            summary_confidence_threshold: 0.7,
        }
    }
}

impl ExtractionConfig {
    /// Check that scores and thresholds stay within 0.0 - 1.0.
    pub fn validate(&self) -> Result<()> {
        let unit_values = [
            ("context_penalty", self.context_penalty),
            ("generic_confidence", self.generic_confidence),
            ("high_confidence_threshold", self.high_confidence_threshold),
            ("summary_confidence_threshold", self.summary_confidence_threshold),
        ];

        for (name, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(InsurefinError::Config(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (json, csv or text).
    pub format: String,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: true,
        }
    }
}

impl InsurefinConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.extraction.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction": {"include_all_amounts": true}}"#).unwrap();

        let config = InsurefinConfig::from_file(&path).unwrap();
        assert!(config.extraction.include_all_amounts);
        assert_eq!(config.extraction.context_radius, 50);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InsurefinConfig::default();
        config.output.format = "csv".to_string();
        config.save(&path).unwrap();

        assert_eq!(InsurefinConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction": {"context_penalty": 1.5}}"#).unwrap();

        let err = InsurefinConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, InsurefinError::Config(_)));
    }
}
