//! Race time prediction from a previous result.
//!
//! Projects a finish time at one race distance from a known time at another,
//! slowing the previous average velocity by a degradation factor of
//! `(target / previous) ^ exponent`. The default exponent is 0.07.
//!
//! ## Example
//! ```rust
//! use run_metrics::prediction::{predict_race_time, RaceDistance};
//!
//! let prediction = predict_race_time(RaceDistance::FiveK, "20:00", RaceDistance::TenK).unwrap();
//! println!("10K: {} ({}/mi)", prediction.predicted, prediction.pace_per_mile.format_pace());
//! ```

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::duration::{validate_time, Duration};
use crate::error::{Result, RunMetricsError};

/// Kilometres to statute miles
pub const KM_TO_MILES: f64 = 0.621371;

/// Field label used in validation messages for the previous time
pub const PREVIOUS_TIME_LABEL: &str = "previous race time";

/// Standard road race distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum RaceDistance {
    #[serde(rename = "5k")]
    FiveK,
    #[serde(rename = "10k")]
    TenK,
    #[serde(rename = "half")]
    HalfMarathon,
    #[serde(rename = "full")]
    Marathon,
}

impl RaceDistance {
    pub const ALL: [RaceDistance; 4] = [
        RaceDistance::FiveK,
        RaceDistance::TenK,
        RaceDistance::HalfMarathon,
        RaceDistance::Marathon,
    ];

    /// Distance in kilometres.
    pub fn km(&self) -> f64 {
        match self {
            RaceDistance::FiveK => 5.0,
            RaceDistance::TenK => 10.0,
            RaceDistance::HalfMarathon => 21.1,
            RaceDistance::Marathon => 42.2,
        }
    }

    /// Short key used by callers to select a distance.
    pub fn key(&self) -> &'static str {
        match self {
            RaceDistance::FiveK => "5k",
            RaceDistance::TenK => "10k",
            RaceDistance::HalfMarathon => "half",
            RaceDistance::Marathon => "full",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RaceDistance::FiveK => "5K",
            RaceDistance::TenK => "10K",
            RaceDistance::HalfMarathon => "Half Marathon",
            RaceDistance::Marathon => "Marathon",
        }
    }
}

impl fmt::Display for RaceDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for RaceDistance {
    type Err = RunMetricsError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        RaceDistance::ALL
            .into_iter()
            .find(|d| d.key() == key)
            .ok_or_else(|| RunMetricsError::UnknownDistance { key: s.to_string() })
    }
}

/// Tuning for the prediction model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Exponent applied to the distance ratio to get the degradation factor
    pub degradation_exponent: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            degradation_exponent: 0.07,
        }
    }
}

/// Predicted result at the target distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct RacePrediction {
    pub previous: RaceDistance,
    pub target: RaceDistance,
    /// Predicted finish time, floored to whole seconds
    pub predicted: Duration,
    pub pace_per_mile: Duration,
    pub pace_per_km: Duration,
    /// Unrounded prediction in seconds
    pub predicted_seconds: f64,
    /// Average velocity of the previous race (km/h)
    pub previous_velocity_kmh: f64,
    /// Average velocity implied by the prediction (km/h)
    pub predicted_velocity_kmh: f64,
}

/// Predict a race time with the default model.
///
/// # Arguments
/// * `previous` - Distance of the known result
/// * `previous_time` - Known result as `MM:SS` or `HH:MM:SS`
/// * `target` - Distance to predict
///
/// # Errors
/// [`RunMetricsError::Validation`] if `previous_time` is not a valid time.
pub fn predict_race_time(
    previous: RaceDistance,
    previous_time: &str,
    target: RaceDistance,
) -> Result<RacePrediction> {
    predict_race_time_with_config(previous, previous_time, target, &PredictionConfig::default())
}

/// Predict a race time with a custom model configuration.
pub fn predict_race_time_with_config(
    previous: RaceDistance,
    previous_time: &str,
    target: RaceDistance,
    config: &PredictionConfig,
) -> Result<RacePrediction> {
    let time = validate_time(previous_time, PREVIOUS_TIME_LABEL)?;
    debug!(
        "[Predictor] {} in {}s -> {}",
        previous.key(),
        time.as_secs(),
        target.key()
    );

    let prediction = project(previous, time, target, config);
    info!(
        "[Predictor] Predicted {} {} from {} {}",
        target, prediction.predicted, previous, time
    );
    Ok(prediction)
}

/// Predict every standard distance from one previous result.
pub fn predict_all_distances(
    previous: RaceDistance,
    previous_time: &str,
) -> Result<Vec<RacePrediction>> {
    let config = PredictionConfig::default();
    let time = validate_time(previous_time, PREVIOUS_TIME_LABEL)?;
    Ok(RaceDistance::ALL
        .into_iter()
        .map(|target| project(previous, time, target, &config))
        .collect())
}

fn project(
    previous: RaceDistance,
    time: Duration,
    target: RaceDistance,
    config: &PredictionConfig,
) -> RacePrediction {
    let total_seconds = time.as_secs() as f64;
    let previous_km = previous.km();
    let target_km = target.km();

    let previous_velocity = previous_km / (total_seconds / 3600.0);
    let ratio = target_km / previous_km;
    let degradation = ratio.powf(config.degradation_exponent);
    let predicted_velocity = previous_velocity / degradation;

    // Equal to target_km / predicted_velocity * 3600 without the round trip
    // through velocity, so equal distances reproduce the input exactly.
    let predicted_seconds = total_seconds * ratio * degradation;

    let pace_per_mile = predicted_seconds / (target_km * KM_TO_MILES);
    let pace_per_km = predicted_seconds / target_km;

    RacePrediction {
        previous,
        target,
        predicted: Duration::from_secs_floor(predicted_seconds),
        pace_per_mile: Duration::from_secs_floor(pace_per_mile),
        pace_per_km: Duration::from_secs_floor(pace_per_km),
        predicted_seconds,
        previous_velocity_kmh: previous_velocity,
        predicted_velocity_kmh: predicted_velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeFormatError;

    #[test]
    fn test_same_distance_is_identity() {
        for distance in RaceDistance::ALL {
            let p = predict_race_time(distance, "1:23:45", distance).unwrap();
            assert_eq!(p.predicted.as_secs(), 5025);
            assert_eq!(p.predicted_velocity_kmh, p.previous_velocity_kmh);
        }
    }

    #[test]
    fn test_5k_to_10k_follows_formula() {
        let p = predict_race_time(RaceDistance::FiveK, "20:00", RaceDistance::TenK).unwrap();

        let velocity: f64 = 5.0 / (1200.0 / 3600.0);
        assert!((p.previous_velocity_kmh - velocity).abs() < 1e-9);

        let expected_velocity = velocity / 2.0_f64.powf(0.07);
        let expected = 10.0 / expected_velocity * 3600.0;
        assert!((p.predicted_seconds - expected).abs() < 1e-6);
        assert_eq!(p.predicted.as_secs(), expected.floor() as u32);

        let per_km = expected / 10.0;
        let per_mile = expected / (10.0 * KM_TO_MILES);
        assert_eq!(p.pace_per_km.as_secs(), per_km.floor() as u32);
        assert_eq!(p.pace_per_mile.as_secs(), per_mile.floor() as u32);
    }

    #[test]
    fn test_longer_race_is_slower_per_km() {
        let p = predict_race_time(RaceDistance::TenK, "45:00", RaceDistance::Marathon).unwrap();
        assert!(p.pace_per_km.as_secs() > 270);
        assert!(p.predicted.hours() >= 3);
        assert!(p.predicted.to_string().matches(':').count() == 2);
    }

    #[test]
    fn test_shorter_race_is_faster_per_km() {
        let p = predict_race_time(RaceDistance::HalfMarathon, "1:40:00", RaceDistance::FiveK)
            .unwrap();
        let previous_per_km = 6000.0 / 21.1;
        assert!((p.pace_per_km.as_secs() as f64) < previous_per_km);
    }

    #[test]
    fn test_invalid_time_fails_before_prediction() {
        let err = predict_race_time(RaceDistance::FiveK, "20:75", RaceDistance::TenK).unwrap_err();
        assert!(matches!(
            err,
            RunMetricsError::Validation(TimeFormatError::OutOfRange { .. })
        ));

        let err = predict_race_time(RaceDistance::FiveK, "", RaceDistance::TenK).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a previous race time");
    }

    #[test]
    fn test_custom_exponent() {
        let config = PredictionConfig {
            degradation_exponent: 0.0,
        };
        let p = predict_race_time_with_config(
            RaceDistance::FiveK,
            "20:00",
            RaceDistance::TenK,
            &config,
        )
        .unwrap();
        assert_eq!(p.predicted.as_secs(), 2400);
    }

    #[test]
    fn test_predict_all_distances() {
        let all = predict_all_distances(RaceDistance::TenK, "50:00").unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[1].target, RaceDistance::TenK);
        assert_eq!(all[1].predicted.as_secs(), 3000);
        assert!(all.windows(2).all(|w| w[0].predicted < w[1].predicted));
    }

    #[test]
    fn test_distance_keys() {
        assert_eq!("5k".parse::<RaceDistance>().unwrap(), RaceDistance::FiveK);
        assert_eq!(" Half ".parse::<RaceDistance>().unwrap(), RaceDistance::HalfMarathon);
        assert_eq!("full".parse::<RaceDistance>().unwrap().display_name(), "Marathon");
        assert!(matches!(
            "ultra".parse::<RaceDistance>(),
            Err(RunMetricsError::UnknownDistance { .. })
        ));
        assert_eq!(serde_json::to_string(&RaceDistance::TenK).unwrap(), "\"10k\"");
    }

    #[test]
    fn test_prediction_is_idempotent() {
        let a = predict_race_time(RaceDistance::FiveK, "22:10", RaceDistance::Marathon).unwrap();
        let b = predict_race_time(RaceDistance::FiveK, "22:10", RaceDistance::Marathon).unwrap();
        assert_eq!(a, b);
    }
}
