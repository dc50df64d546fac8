//! Training paces derived from a 5K race time.
//!
//! The 5K race pace is scaled by a fixed multiplier per training intensity,
//! from easy running (1.2x slower) to mile pace (0.92x).

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::duration::{validate_time, Duration};
use crate::error::Result;

/// Field label used in validation messages for the 5K time
pub const FIVE_K_TIME_LABEL: &str = "5K time";

/// Miles in a 5K
const FIVE_K_MILES: f64 = 3.107;
/// Kilometres per mile used for the per-mile base pace
const KM_PER_MILE: f64 = 1.609;
const FIVE_K_KM: f64 = 5.0;

/// (name, purpose, multiplier of 5K pace)
const TRAINING_PACES: [(&str, &str, f64); 5] = [
    ("Easy/Recovery", "Easy runs, warm-up, cool-down", 1.2),
    ("Marathon Pace", "Long runs, marathon race pace", 1.1),
    ("Threshold/Tempo", "Tempo runs, lactate threshold", 1.05),
    ("5K Race Pace", "5K intervals, VO2 max training", 1.0),
    ("Mile/1500m Pace", "Speed intervals, neuromuscular power", 0.92),
];

/// A named training pace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TrainingPace {
    pub name: String,
    pub purpose: String,
    /// Multiplier applied to 5K race pace
    pub multiplier: f64,
    /// Pace per mile, floored to whole seconds
    pub pace_per_mile: Duration,
    /// Pace per kilometre, floored to whole seconds
    pub pace_per_km: Duration,
}

/// Compute the five training paces from a 5K time.
///
/// Accepts `MM:SS` and `HH:MM:SS`; the usual validation policy applies
/// with the field label "5K time".
pub fn compute_training_paces(five_k_time: &str) -> Result<Vec<TrainingPace>> {
    let time = validate_time(five_k_time, FIVE_K_TIME_LABEL)?;
    let total_seconds = time.as_secs() as f64;

    let base_per_mile = (total_seconds / FIVE_K_MILES) * KM_PER_MILE;
    let base_per_km = total_seconds / FIVE_K_KM;
    debug!(
        "[Paces] 5K {} -> base {:.1}s/mi {:.1}s/km",
        time, base_per_mile, base_per_km
    );

    let paces: Vec<TrainingPace> = TRAINING_PACES
        .iter()
        .map(|&(name, purpose, multiplier)| TrainingPace {
            name: name.to_string(),
            purpose: purpose.to_string(),
            multiplier,
            pace_per_mile: Duration::from_secs_floor(base_per_mile * multiplier),
            pace_per_km: Duration::from_secs_floor(base_per_km * multiplier),
        })
        .collect();

    info!(
        "[Paces] Calculated {} training paces from 5K {}",
        paces.len(),
        time
    );
    Ok(paces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RunMetricsError, TimeFormatError};

    #[test]
    fn test_paces_from_20_minute_5k() {
        let paces = compute_training_paces("20:00").unwrap();
        assert_eq!(paces.len(), 5);

        let names: Vec<&str> = paces.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Easy/Recovery",
                "Marathon Pace",
                "Threshold/Tempo",
                "5K Race Pace",
                "Mile/1500m Pace"
            ]
        );

        // 5K pace: 1200 / 5 = 240s/km, 1200 / 3.107 * 1.609 = 621.4s/mi
        let race = &paces[3];
        assert_eq!(race.pace_per_km.format_pace(), "4:00");
        assert_eq!(race.pace_per_mile.format_pace(), "10:21");

        // Easy: 288s/km, 745.7s/mi
        assert_eq!(paces[0].pace_per_km.format_pace(), "4:48");
        assert_eq!(paces[0].pace_per_mile.as_secs(), 745);
    }

    #[test]
    fn test_paces_truncate_not_round() {
        // 1199 / 5 * 0.92 = 220.616 -> 220
        let paces = compute_training_paces("19:59").unwrap();
        assert_eq!(paces[4].pace_per_km.as_secs(), 220);
    }

    #[test]
    fn test_paces_are_ordered_slowest_first() {
        let paces = compute_training_paces("25:30").unwrap();
        assert!(paces
            .windows(2)
            .all(|w| w[0].pace_per_km >= w[1].pace_per_km));
    }

    #[test]
    fn test_hour_long_5k_uses_all_segments() {
        let paces = compute_training_paces("1:05:00").unwrap();
        assert_eq!(paces[3].pace_per_km.as_secs(), 3900 / 5);
    }

    #[test]
    fn test_invalid_5k_time() {
        let err = compute_training_paces("20").unwrap_err();
        assert!(matches!(
            err,
            RunMetricsError::Validation(TimeFormatError::BadSegmentCount { .. })
        ));
        assert!(err.to_string().starts_with("5K time"));
    }
}
