//! Weekly mileage planning.
//!
//! Two independent tools:
//! - [`mileage_progression`] ramps weekly mileage toward a target, capping
//!   each week's increase at 10% of the starting mileage (the 10% rule)
//! - [`generate_training_plan`] splits one week's distance across 3-7
//!   training days using fixed percentage tables
//!
//! ## Example
//! ```rust
//! use run_metrics::mileage::{generate_training_plan, DistanceUnit};
//!
//! let plan = generate_training_plan(40.0, 3, DistanceUnit::Miles).unwrap();
//! for day in &plan.days {
//!     println!("Day {}: {} {} {}", day.day, day.label, day.distance, plan.unit.symbol());
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{OptionExt, Result, RunMetricsError};
use crate::round_half_up;

use self::RunType::{EasyRun, LongRun, SpeedWork, TempoRun, TempoSpeedWork};

/// Kilometres per statute mile
pub const KM_PER_MILE: f64 = 1.60934;

/// Longest progression that will be laid out week by week (ten years)
pub const MAX_PROGRESSION_WEEKS: u32 = 520;

// ============================================================================
// Mileage Progression
// ============================================================================

/// Configuration for the mileage progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Largest weekly increase as a fraction of current mileage
    pub max_increase_ratio: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            max_increase_ratio: 0.10,
        }
    }
}

/// Mileage for one week of the progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct MileageWeek {
    /// Week number, starting at 1
    pub week: u32,
    /// Mileage rounded to a whole number
    pub mileage: f64,
}

/// Result of a mileage progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct MileageProgression {
    /// Increase per week needed to reach the target on time
    pub weekly_increase: f64,
    /// Largest increase the 10% rule allows
    pub max_safe_increase: f64,
    /// The target needs faster growth than the 10% rule allows
    pub exceeds_safe_rate: bool,
    pub weeks: Vec<MileageWeek>,
}

/// Ramp weekly mileage from `current` toward `target` over `weeks` weeks.
///
/// # Errors
/// - [`RunMetricsError::MissingField`] if any input is zero, negative or not finite
/// - [`RunMetricsError::ValueOutOfRange`] for more than [`MAX_PROGRESSION_WEEKS`] weeks
pub fn mileage_progression(current: f64, weeks: u32, target: f64) -> Result<MileageProgression> {
    mileage_progression_with_config(current, weeks, target, &ProgressionConfig::default())
}

/// Ramp weekly mileage with a custom increase cap.
pub fn mileage_progression_with_config(
    current: f64,
    weeks: u32,
    target: f64,
    config: &ProgressionConfig,
) -> Result<MileageProgression> {
    let current = positive(current).ok_or_missing_field("current mileage")?;
    let weeks = Some(weeks)
        .filter(|&w| w > 0)
        .ok_or_missing_field("weeks to goal")?;
    if weeks > MAX_PROGRESSION_WEEKS {
        return Err(RunMetricsError::ValueOutOfRange {
            field: "weeks to goal".to_string(),
            value: weeks,
        });
    }
    let target = positive(target).ok_or_missing_field("target mileage")?;

    let weekly_increase = (target - current) / weeks as f64;
    let max_safe_increase = current * config.max_increase_ratio;
    let exceeds_safe_rate = weekly_increase > max_safe_increase;
    debug!(
        "[Mileage] {} -> {} over {} weeks: +{:.1}/week (safe max {:.1})",
        current, target, weeks, weekly_increase, max_safe_increase
    );

    let increase = weekly_increase.min(max_safe_increase);
    let mut running = current;
    let weeks: Vec<MileageWeek> = (1..=weeks)
        .map(|week| {
            running += increase;
            if running > target {
                running = target;
            }
            MileageWeek {
                week,
                mileage: round_half_up(running),
            }
        })
        .collect();

    if exceeds_safe_rate {
        warn!(
            "[Mileage] Target needs +{:.1}/week, above the safe +{:.1}/week",
            weekly_increase, max_safe_increase
        );
    }

    Ok(MileageProgression {
        weekly_increase,
        max_safe_increase,
        exceeds_safe_rate,
        weeks,
    })
}

fn positive(value: f64) -> Option<f64> {
    Some(value).filter(|v| v.is_finite() && *v > 0.0)
}

// ============================================================================
// Weekly Training Plan
// ============================================================================

/// Unit for training plan distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "mi")]
    Miles,
    #[serde(rename = "km")]
    Kilometers,
}

impl DistanceUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Kilometers => "km",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DistanceUnit::Miles => "miles",
            DistanceUnit::Kilometers => "kilometers",
        }
    }

    fn to_miles(self, distance: f64) -> f64 {
        match self {
            DistanceUnit::Miles => distance,
            DistanceUnit::Kilometers => distance / KM_PER_MILE,
        }
    }

    fn from_miles_to_unit(self, miles: f64) -> f64 {
        match self {
            DistanceUnit::Miles => miles,
            DistanceUnit::Kilometers => miles * KM_PER_MILE,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for DistanceUnit {
    type Err = RunMetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mi" | "miles" => Ok(DistanceUnit::Miles),
            "km" | "kilometers" => Ok(DistanceUnit::Kilometers),
            _ => Err(RunMetricsError::UnknownUnit {
                unit: s.to_string(),
            }),
        }
    }
}

/// Kind of run scheduled on a plan day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum RunType {
    LongRun,
    EasyRun,
    TempoSpeedWork,
    TempoRun,
    SpeedWork,
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunType::LongRun => write!(f, "Long Run"),
            RunType::EasyRun => write!(f, "Easy Run"),
            RunType::TempoSpeedWork => write!(f, "Tempo/Speed Work"),
            RunType::TempoRun => write!(f, "Tempo Run"),
            RunType::SpeedWork => write!(f, "Speed Work"),
        }
    }
}

/// Day layouts for 3-7 training days, as (run type, percent of the week).
const PLAN_TABLES: [&[(RunType, u32)]; 5] = [
    &[(LongRun, 40), (EasyRun, 35), (TempoSpeedWork, 25)],
    &[(LongRun, 35), (EasyRun, 30), (EasyRun, 20), (TempoSpeedWork, 15)],
    &[
        (LongRun, 30),
        (EasyRun, 25),
        (EasyRun, 20),
        (TempoRun, 15),
        (SpeedWork, 10),
    ],
    &[
        (LongRun, 25),
        (EasyRun, 20),
        (EasyRun, 18),
        (EasyRun, 17),
        (TempoRun, 12),
        (SpeedWork, 8),
    ],
    &[
        (LongRun, 22),
        (EasyRun, 18),
        (EasyRun, 16),
        (EasyRun, 14),
        (EasyRun, 12),
        (TempoRun, 10),
        (SpeedWork, 8),
    ],
];

pub const MIN_TRAINING_DAYS: u32 = 3;
pub const MAX_TRAINING_DAYS: u32 = 7;

/// Day layout for a number of training days per week.
pub fn plan_table(training_days: u32) -> Option<&'static [(RunType, u32)]> {
    if !(MIN_TRAINING_DAYS..=MAX_TRAINING_DAYS).contains(&training_days) {
        return None;
    }
    Some(PLAN_TABLES[(training_days - MIN_TRAINING_DAYS) as usize])
}

/// One training day in a weekly plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TrainingPlanDay {
    /// Day number, starting at 1
    pub day: u32,
    pub run_type: RunType,
    /// Share of the weekly distance (0-100)
    pub percentage: u32,
    /// Run type and share, e.g. "Long Run (40%)"
    pub label: String,
    /// Distance in the plan's unit, rounded to a whole number
    pub distance: f64,
}

/// A week of training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TrainingPlan {
    /// Requested weekly total, in `unit`
    pub weekly_distance: f64,
    pub unit: DistanceUnit,
    pub days: Vec<TrainingPlanDay>,
}

impl TrainingPlan {
    /// One-line description, e.g. "40 miles over 3 days".
    pub fn summary(&self) -> String {
        format!(
            "{} {} over {} days",
            self.weekly_distance,
            self.unit.name(),
            self.days.len()
        )
    }

    /// Sum of the rounded day distances.
    pub fn total_distance(&self) -> f64 {
        self.days.iter().map(|d| d.distance).sum()
    }
}

/// Split a weekly distance across training days.
///
/// Each day's share is applied as a fraction (0.35, not 35 / 100) to the
/// weekly miles; kilometre plans are converted to miles first and back
/// afterwards, then each day is rounded. The fraction form decides which way
/// x.5 boundaries fall, e.g. 90 mi at 35% is 31.4999... and rounds to 31.
///
/// # Errors
/// - [`RunMetricsError::UnsupportedDayCount`] outside 3-7 days
/// - [`RunMetricsError::MissingField`] for a zero, negative or non-finite distance
pub fn generate_training_plan(
    weekly_distance: f64,
    training_days: u32,
    unit: DistanceUnit,
) -> Result<TrainingPlan> {
    let weekly_distance = positive(weekly_distance).ok_or_missing_field("weekly distance")?;
    let table = plan_table(training_days).ok_or(RunMetricsError::UnsupportedDayCount {
        days: training_days,
    })?;

    let weekly_miles = unit.to_miles(weekly_distance);
    debug!(
        "[Mileage] Planning {} {} ({:.2} mi) over {} days",
        weekly_distance, unit, weekly_miles, training_days
    );

    let days: Vec<TrainingPlanDay> = table
        .iter()
        .zip(1..)
        .map(|(&(run_type, percentage), day)| {
            let share = percentage as f64 / 100.0;
            let miles = weekly_miles * share;
            TrainingPlanDay {
                day,
                run_type,
                percentage,
                label: format!("{} ({}%)", run_type, percentage),
                distance: round_half_up(unit.from_miles_to_unit(miles)),
            }
        })
        .collect();

    let plan = TrainingPlan {
        weekly_distance,
        unit,
        days,
    };
    info!("[Mileage] Generated plan: {}", plan.summary());
    Ok(plan)
}
