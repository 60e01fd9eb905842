// Data-driven settings for the `generate` driver.
//
// `GeneratorConfig` is loaded from JSON (`--config path.json`); any field
// left out takes its default, and the defaults reproduce the stock routine:
// standard tuning, four Aeolian scales, 100 BPM, and the reversed walk
// written after the forward one. Text fields are validated by `context_for`
// when the driver actually uses them, through the usual parsers.

use crate::catalog::{DEFAULT_SCALES, DEFAULT_TUNING};
use crate::error::TheoryError;
use crate::scale::Scale;
use crate::tuning::{Context, Tuning};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Open strings, lowest first, e.g. "E2-A2-D3-G3-B3-E4".
    pub tuning: String,
    /// Scales to pick from, e.g. "E Aeolian".
    pub scales: Vec<String>,
    pub tempo_bpm: u16,
    /// Fixed seed for reproducible picks; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Also write the exercise walked over the reversed shape.
    pub include_reverse: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            tuning: DEFAULT_TUNING.to_string(),
            scales: DEFAULT_SCALES.iter().map(|s| s.to_string()).collect(),
            tempo_bpm: 100,
            seed: None,
            include_reverse: true,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Ok(GeneratorConfig::from_json(&data)?)
    }

    pub fn parsed_tuning(&self) -> Result<Tuning, TheoryError> {
        self.tuning.parse()
    }

    /// Shape-building context for one of the configured scale texts.
    pub fn context_for(&self, scale_text: &str) -> Result<Context, TheoryError> {
        let scale: Scale = scale_text.parse()?;
        Ok(Context::new(self.parsed_tuning()?, scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.scales.len(), 4);
        assert_eq!(config.parsed_tuning().unwrap(), Tuning::standard());
        assert!(config.include_reverse);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GeneratorConfig::from_json(r#"{"seed": 7, "scales": ["A major pentatonic"]}"#)
            .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.scales, vec!["A major pentatonic".to_string()]);
        assert_eq!(config.tempo_bpm, 100);
        assert_eq!(config.tuning, DEFAULT_TUNING);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GeneratorConfig {
            tempo_bpm: 80,
            include_reverse: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(GeneratorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_context_for_reports_bad_text() {
        let config = GeneratorConfig {
            tuning: "E2-A2-Q3".to_string(),
            ..Default::default()
        };
        assert!(config.context_for("E Aeolian").is_err());
        assert!(GeneratorConfig::default().context_for("E nonsense").is_err());
        assert!(GeneratorConfig::default().context_for("E aeolian").is_ok());
    }
}
