//! FFI bindings for mobile platforms (iOS/Android).
//!
//! This module provides the UniFFI bindings that expose the calculators to
//! Kotlin and Swift. All FFI functions are prefixed with `ffi_` to avoid
//! naming conflicts with the internal API.
//!
//! Calculators take primitive arguments (distance and unit keys as strings)
//! and return JSON. A failure is returned as
//! `{"error": {"kind": "...", "message": "..."}}` so the caller can show the
//! message directly.

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    compute_hr_zones_with_config, compute_training_paces, generate_training_plan,
    init_logging, mileage_progression_with_config, parse_seconds, predict_race_time_with_config,
    sanitize_time_input, validate, CalculatorConfig, DistanceUnit, RaceDistance, RacePrediction,
    Result, RunMetricsError, ValidationResult,
};

// ============================================================================
// Time Input
// ============================================================================

/// Validate a time field and return a message for the user.
#[uniffi::export]
pub fn ffi_validate_time(input: String, field_label: String) -> ValidationResult {
    init_logging();
    let result = validate(&input, &field_label);
    debug!(
        "[RunMetricsRust] validate '{}' ({}): valid={}",
        input, field_label, result.valid
    );
    result
}

/// Convert a well-formed time string to seconds.
#[uniffi::export]
pub fn ffi_parse_seconds(input: String) -> Option<u32> {
    parse_seconds(&input)
}

/// Strip characters that cannot appear in a time field.
#[uniffi::export]
pub fn ffi_sanitize_time_input(raw: String) -> String {
    sanitize_time_input(&raw)
}

// ============================================================================
// Calculators
// ============================================================================

/// Predict a race time. Distances are keys: "5k", "10k", "half", "full".
#[uniffi::export]
pub fn ffi_predict_race_time(
    previous_distance: String,
    previous_time: String,
    target_distance: String,
    config_json: Option<String>,
) -> String {
    init_logging();
    info!(
        "[RunMetricsRust] predict_race_time {} {} -> {}",
        previous_distance, previous_time, target_distance
    );
    to_json_response(predict_from_keys(
        &previous_distance,
        &previous_time,
        &target_distance,
        config_json,
    ))
}

fn predict_from_keys(
    previous_distance: &str,
    previous_time: &str,
    target_distance: &str,
    config_json: Option<String>,
) -> Result<RacePrediction> {
    let config = load_config(config_json)?;
    let previous: RaceDistance = previous_distance.parse()?;
    let target: RaceDistance = target_distance.parse()?;
    predict_race_time_with_config(previous, previous_time, target, &config.prediction)
}

/// Heart rate reserve zones. Pass `None` for an empty field.
#[uniffi::export]
pub fn ffi_compute_hr_zones(
    age: Option<u32>,
    resting_hr: Option<u32>,
    config_json: Option<String>,
) -> String {
    init_logging();
    let result = load_config(config_json)
        .and_then(|config| compute_hr_zones_with_config(age, resting_hr, &config.heart_rate));
    to_json_response(result)
}

/// Training paces from a 5K time.
#[uniffi::export]
pub fn ffi_compute_training_paces(five_k_time: String) -> String {
    init_logging();
    to_json_response(compute_training_paces(&five_k_time))
}

/// Weekly mileage progression under the 10% rule.
#[uniffi::export]
pub fn ffi_mileage_progression(
    current: f64,
    weeks: u32,
    target: f64,
    config_json: Option<String>,
) -> String {
    init_logging();
    let result = load_config(config_json).and_then(|config| {
        mileage_progression_with_config(current, weeks, target, &config.progression)
    });
    to_json_response(result)
}

/// Weekly training plan. `unit` is "mi" or "km".
#[uniffi::export]
pub fn ffi_generate_training_plan(
    weekly_distance: f64,
    training_days: u32,
    unit: String,
) -> String {
    init_logging();
    let result = unit
        .parse::<DistanceUnit>()
        .and_then(|unit| generate_training_plan(weekly_distance, training_days, unit));
    to_json_response(result)
}

// ============================================================================
// Helpers
// ============================================================================

fn load_config(config_json: Option<String>) -> Result<CalculatorConfig> {
    match config_json {
        Some(json) if !json.trim().is_empty() => CalculatorConfig::from_json(&json),
        _ => Ok(CalculatorConfig::default()),
    }
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'static str>,
    message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

impl From<&RunMetricsError> for ErrorResponse {
    fn from(e: &RunMetricsError) -> Self {
        let detail = match e {
            RunMetricsError::Validation(inner) => Some(inner.kind()),
            _ => None,
        };
        Self {
            error: ErrorBody {
                kind: e.kind(),
                detail,
                message: e.to_string(),
            },
        }
    }
}

fn to_json_response<T: Serialize>(result: Result<T>) -> String {
    let json = match &result {
        Ok(value) => serde_json::to_string(value),
        Err(e) => {
            warn!("[RunMetricsRust] {} ({})", e, e.kind());
            serde_json::to_string(&ErrorResponse::from(e))
        }
    };
    json.unwrap_or_else(|_| "{}".to_string())
}
