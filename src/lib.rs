//! # Run Metrics
//!
//! Pure running calculators for a presentation layer (web page, mobile app)
//! to call with primitive inputs.
//!
//! This library provides:
//! - Time-string validation and parsing (`MM:SS` / `HH:MM:SS`)
//! - Race time prediction between standard distances
//! - Heart rate reserve training zones
//! - Training paces from a 5K time
//! - Weekly mileage progression (10% rule) and weekly training plans
//!
//! Every function is stateless: identical inputs give identical outputs and
//! calls may run concurrently from any thread.
//!
//! ## Features
//!
//! - **`ffi`** - Enable UniFFI bindings for mobile platforms (iOS/Android)
//!
//! ## Quick Start
//!
//! ```rust
//! use run_metrics::{compute_hr_zones, predict_race_time, validate, RaceDistance};
//!
//! let check = validate("45:10", "race time");
//! assert!(check.valid);
//!
//! let prediction = predict_race_time(RaceDistance::TenK, "45:10", RaceDistance::HalfMarathon)?;
//! println!("Half marathon: {}", prediction.predicted);
//!
//! let zones = compute_hr_zones(Some(35), Some(52))?;
//! for zone in &zones.zones {
//!     println!("{}: {}-{} bpm", zone.name, zone.min_bpm, zone.max_bpm);
//! }
//! # Ok::<(), run_metrics::RunMetricsError>(())
//! ```

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, RunMetricsError, TimeFormatError, TimeUnit};

// Time parsing, validation and formatting
pub mod duration;
pub use duration::{
    parse_seconds, sanitize_time_input, validate, validate_time, Duration, ValidationResult,
};

// Race time prediction
pub mod prediction;
pub use prediction::{
    predict_all_distances, predict_race_time, predict_race_time_with_config, PredictionConfig,
    RaceDistance, RacePrediction,
};

// Heart rate reserve zones
pub mod zones;
pub use zones::{
    compute_hr_zones, compute_hr_zones_with_config, HeartRateZone, HeartRateZoneConfig,
    HeartRateZones,
};

// Training paces from a 5K time
pub mod paces;
pub use paces::{compute_training_paces, TrainingPace};

// Mileage progression and weekly plans
pub mod mileage;
pub use mileage::{
    generate_training_plan, mileage_progression, mileage_progression_with_config, DistanceUnit,
    MileageProgression, MileageWeek, ProgressionConfig, RunType, TrainingPlan, TrainingPlanDay,
};

// Combined calculator configuration
pub mod config;
pub use config::CalculatorConfig;

// FFI bindings for mobile platforms (iOS/Android)
#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
pub(crate) fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("RunMetricsRust"),
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
pub(crate) fn init_logging() {
    // No-op on non-Android platforms
}

/// Round to the nearest integer, halves toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
