//! Combined configuration for all calculators.
//!
//! Every section is optional in JSON; missing values fall back to the
//! standard constants (0.07 exponent, 220 - age, 10% rule).
//!
//! ```rust
//! use run_metrics::CalculatorConfig;
//!
//! let config = CalculatorConfig::from_json(r#"{"progression": {"max_increase_ratio": 0.05}}"#).unwrap();
//! assert_eq!(config.prediction.degradation_exponent, 0.07);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RunMetricsError};
use crate::mileage::ProgressionConfig;
use crate::prediction::PredictionConfig;
use crate::zones::HeartRateZoneConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub prediction: PredictionConfig,
    pub heart_rate: HeartRateZoneConfig,
    pub progression: ProgressionConfig,
}

impl CalculatorConfig {
    /// Parse and check a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| RunMetricsError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;
        config.validate()?;
        debug!("[Config] Loaded {:?}", config);
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Reject values no calculator can work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| -> Result<()> {
            Err(RunMetricsError::Config {
                message: message.to_string(),
            })
        };

        let exponent = self.prediction.degradation_exponent;
        if !exponent.is_finite() || exponent < 0.0 {
            return invalid("degradation_exponent must be a non-negative number");
        }

        let fractions = &self.heart_rate.reserve_fractions;
        if fractions.iter().any(|f| !f.is_finite() || *f < 0.0 || *f > 1.0) {
            return invalid("reserve_fractions must lie between 0 and 1");
        }
        if fractions.windows(2).any(|w| w[0] >= w[1]) {
            return invalid("reserve_fractions must be strictly increasing");
        }
        if self.heart_rate.max_hr_base <= 0 {
            return invalid("max_hr_base must be positive");
        }

        let ratio = self.progression.max_increase_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return invalid("max_increase_ratio must be positive");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = CalculatorConfig::from_json("{}").unwrap();
        assert_eq!(config, CalculatorConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config =
            CalculatorConfig::from_json(r#"{"heart_rate": {"default_resting_hr": 55}}"#).unwrap();
        assert_eq!(config.heart_rate.default_resting_hr, 55);
        assert_eq!(config.heart_rate.max_hr_base, 220);
        assert_eq!(config.progression.max_increase_ratio, 0.10);
    }

    #[test]
    fn test_json_round_trip() {
        let config = CalculatorConfig::default();
        assert_eq!(CalculatorConfig::from_json(&config.to_json()).unwrap(), config);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            CalculatorConfig::from_json("{not json"),
            Err(RunMetricsError::Config { .. })
        ));
    }

    #[test]
    fn test_rejects_unusable_values() {
        let bad = [
            r#"{"prediction": {"degradation_exponent": -0.1}}"#,
            r#"{"heart_rate": {"reserve_fractions": [0.5, 0.6, 0.6, 0.8, 0.9]}}"#,
            r#"{"heart_rate": {"reserve_fractions": [0.5, 0.6, 0.7, 0.8, 1.5]}}"#,
            r#"{"progression": {"max_increase_ratio": 0}}"#,
        ];
        for json in bad {
            assert!(
                matches!(
                    CalculatorConfig::from_json(json),
                    Err(RunMetricsError::Config { .. })
                ),
                "accepted {}",
                json
            );
        }
    }
}
