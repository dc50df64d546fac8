//! Heart rate training zones from the heart rate reserve (Karvonen) method.
//!
//! Max HR is estimated as `220 - age` and the reserve is `max - resting`.
//! Zone boundaries sit at 50/60/70/80/90% of the reserve above resting HR,
//! each rounded independently; zone 5 tops out at max HR itself.
//!
//! ## Example
//! ```rust
//! use run_metrics::zones::compute_hr_zones;
//!
//! let zones = compute_hr_zones(Some(30), Some(60)).unwrap();
//! assert_eq!(zones.max_hr, 190);
//! println!("Zone 2: {}-{} bpm", zones.zones[1].min_bpm, zones.zones[1].max_bpm);
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{OptionExt, Result, RunMetricsError};
use crate::round_half_up;

/// Names and purposes of zones 1-5
const ZONE_DESCRIPTIONS: [(&str, &str); 5] = [
    ("Zone 1 - Recovery", "Active recovery, warm-up"),
    ("Zone 2 - Aerobic Base", "Easy runs, base building"),
    ("Zone 3 - Aerobic", "Steady runs, marathon pace"),
    ("Zone 4 - Threshold", "Tempo runs, lactate threshold"),
    ("Zone 5 - VO2 Max", "Intervals, 5K pace"),
];

/// Configuration for heart rate reserve zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartRateZoneConfig {
    /// Max HR estimate is this value minus age
    pub max_hr_base: i32,
    /// Resting HR used when none is given
    pub default_resting_hr: u32,
    /// Lower bound of each zone as a fraction of HR reserve [Z1..Z5].
    /// Each zone ends where the next begins; Z5 ends at max HR.
    pub reserve_fractions: [f64; 5],
}

impl Default for HeartRateZoneConfig {
    fn default() -> Self {
        Self {
            max_hr_base: 220,
            default_resting_hr: 60,
            reserve_fractions: [0.50, 0.60, 0.70, 0.80, 0.90],
        }
    }
}

impl HeartRateZoneConfig {
    /// Create config with custom reserve fractions
    pub fn with_fractions(reserve_fractions: [f64; 5]) -> Self {
        Self {
            reserve_fractions,
            ..Self::default()
        }
    }

    /// Estimated max HR for an age, `None` if the age does not fit
    pub fn max_hr(&self, age: u32) -> Option<i32> {
        i32::try_from(age)
            .ok()
            .and_then(|age| self.max_hr_base.checked_sub(age))
    }
}

/// A single training zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct HeartRateZone {
    /// Zone number (1-5)
    pub zone: u8,
    pub name: String,
    pub min_bpm: i32,
    pub max_bpm: i32,
    pub purpose: String,
}

/// Result of a zone calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct HeartRateZones {
    pub max_hr: i32,
    pub resting_hr: i32,
    /// Heart rate reserve (max - resting)
    pub reserve: i32,
    /// Zones ordered 1-5
    pub zones: Vec<HeartRateZone>,
}

impl HeartRateZones {
    /// Determine which zone a heart rate falls into (1-5).
    ///
    /// Below zone 1 or above max HR is `None`. A value on a shared boundary
    /// belongs to the higher zone.
    pub fn zone_for(&self, bpm: i32) -> Option<u8> {
        if bpm > self.max_hr {
            return None;
        }
        self.zones
            .iter()
            .rev()
            .find(|z| bpm >= z.min_bpm)
            .map(|z| z.zone)
    }

    /// Get a zone by number (1-5)
    pub fn get_zone(&self, zone: u8) -> Option<&HeartRateZone> {
        self.zones.iter().find(|z| z.zone == zone)
    }
}

/// Calculate heart rate zones with the default configuration.
///
/// # Arguments
/// * `age` - Age in years; `None` or zero is treated as missing
/// * `resting_hr` - Resting HR in BPM; `None` or zero falls back to 60
///
/// # Errors
/// - [`RunMetricsError::MissingAge`] without an age
/// - [`RunMetricsError::ValueOutOfRange`] if age or resting HR is too large to compute with
pub fn compute_hr_zones(age: Option<u32>, resting_hr: Option<u32>) -> Result<HeartRateZones> {
    compute_hr_zones_with_config(age, resting_hr, &HeartRateZoneConfig::default())
}

/// Calculate heart rate zones with a custom configuration.
pub fn compute_hr_zones_with_config(
    age: Option<u32>,
    resting_hr: Option<u32>,
    config: &HeartRateZoneConfig,
) -> Result<HeartRateZones> {
    let age = age.filter(|&a| a > 0).ok_or_missing_age()?;
    let resting = resting_hr
        .filter(|&hr| hr > 0)
        .unwrap_or(config.default_resting_hr);
    let out_of_range = |field: &str, value: u32| RunMetricsError::ValueOutOfRange {
        field: field.to_string(),
        value,
    };

    let max_hr = config.max_hr(age).ok_or_else(|| out_of_range("age", age))?;
    let resting_hr =
        i32::try_from(resting).map_err(|_| out_of_range("resting heart rate", resting))?;
    let reserve = max_hr
        .checked_sub(resting_hr)
        .ok_or_else(|| out_of_range("resting heart rate", resting))?;
    debug!(
        "[Zones] age={} resting={} max={} reserve={}",
        age, resting_hr, max_hr, reserve
    );

    let boundary =
        |fraction: f64| round_half_up(resting_hr as f64 + reserve as f64 * fraction) as i32;
    let fractions = &config.reserve_fractions;

    let zones = ZONE_DESCRIPTIONS
        .iter()
        .enumerate()
        .map(|(i, (name, purpose))| HeartRateZone {
            zone: (i + 1) as u8,
            name: name.to_string(),
            min_bpm: boundary(fractions[i]),
            max_bpm: fractions.get(i + 1).map_or(max_hr, |&f| boundary(f)),
            purpose: purpose.to_string(),
        })
        .collect();

    info!(
        "[Zones] Calculated HR reserve zones, max={}bpm resting={}bpm",
        max_hr, resting_hr
    );

    Ok(HeartRateZones {
        max_hr,
        resting_hr,
        reserve,
        zones,
    })
}
