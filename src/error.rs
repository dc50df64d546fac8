//! Unified error handling for the run-metrics library.
//!
//! Time-string problems are reported as [`TimeFormatError`], which carries the
//! label of the field being validated so the message can be shown to a user
//! as-is. Every calculator returns [`RunMetricsError`], wrapping time errors in
//! [`RunMetricsError::Validation`].

use std::fmt;

use thiserror::Error;

/// Component of a clock time, used when a segment is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Hours,
    Minutes,
    Seconds,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Hours => write!(f, "Hours"),
            TimeUnit::Minutes => write!(f, "Minutes"),
            TimeUnit::Seconds => write!(f, "Seconds"),
        }
    }
}

/// Why a time string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    /// Nothing but whitespace was entered
    #[error("Please enter a {field}")]
    EmptyInput { field: String },
    /// Something other than digits and colons
    #[error("{field} can only contain numbers and colons (e.g., 25:30 or 1:23:45)")]
    InvalidCharacters { field: String },
    /// Not MM:SS or HH:MM:SS
    #[error("{field} must be in MM:SS or HH:MM:SS format")]
    BadSegmentCount { field: String, segments: usize },
    /// A colon-separated part is empty (e.g. "::30")
    #[error("{field} cannot have empty parts (e.g., ::30 is invalid)")]
    EmptySegment { field: String },
    /// A part does not fit an unsigned integer
    #[error("{field} contains invalid numbers")]
    InvalidNumber { field: String },
    /// A part exceeds the clock range for its unit. `leading` marks the
    /// first segment, whose message names the expected layout.
    #[error("{unit} cannot exceed {max}{}", layout_suffix(.unit, .leading))]
    OutOfRange {
        unit: TimeUnit,
        max: u32,
        value: u32,
        leading: bool,
    },
    /// Under one minute
    #[error("{field} seems too short (less than 1 minute)")]
    TooShort { field: String, seconds: u32 },
    /// Over ten hours
    #[error("{field} seems too long (more than 10 hours)")]
    TooLong { field: String, seconds: u32 },
}

fn layout_suffix(unit: &TimeUnit, leading: &bool) -> &'static str {
    match (unit, leading) {
        (TimeUnit::Minutes, true) => " in MM:SS format",
        (TimeUnit::Hours, true) => " in HH:MM:SS format",
        _ => "",
    }
}

impl TimeFormatError {
    /// Stable snake_case tag for serialized error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            TimeFormatError::EmptyInput { .. } => "empty_input",
            TimeFormatError::InvalidCharacters { .. } => "invalid_characters",
            TimeFormatError::BadSegmentCount { .. } => "bad_segment_count",
            TimeFormatError::EmptySegment { .. } => "empty_segment",
            TimeFormatError::InvalidNumber { .. } => "invalid_number",
            TimeFormatError::OutOfRange { .. } => "out_of_range",
            TimeFormatError::TooShort { .. } => "too_short",
            TimeFormatError::TooLong { .. } => "too_long",
        }
    }
}

/// Unified error type for run-metrics operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunMetricsError {
    /// A time input failed validation
    #[error(transparent)]
    Validation(#[from] TimeFormatError),
    /// Heart rate zones need an age
    #[error("Please enter your age")]
    MissingAge,
    /// Training plans exist for 3 to 7 days per week
    #[error("No training plan for {days} days per week (choose 3 to 7)")]
    UnsupportedDayCount { days: u32 },
    /// A required numeric input is missing, zero or negative
    #[error("Please enter {field}")]
    MissingField { field: String },
    /// A numeric input is present but outside the range a calculator supports
    #[error("{field} of {value} is out of range")]
    ValueOutOfRange { field: String, value: u32 },
    /// Race distance key not recognised
    #[error("Unknown race distance '{key}'")]
    UnknownDistance { key: String },
    /// Distance unit not recognised
    #[error("Unknown distance unit '{unit}'")]
    UnknownUnit { unit: String },
    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl RunMetricsError {
    /// Stable snake_case tag for serialized error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            RunMetricsError::Validation(_) => "validation_error",
            RunMetricsError::MissingAge => "missing_age",
            RunMetricsError::UnsupportedDayCount { .. } => "unsupported_day_count",
            RunMetricsError::MissingField { .. } => "missing_field",
            RunMetricsError::ValueOutOfRange { .. } => "value_out_of_range",
            RunMetricsError::UnknownDistance { .. } => "unknown_distance",
            RunMetricsError::UnknownUnit { .. } => "unknown_unit",
            RunMetricsError::Config { .. } => "config_error",
        }
    }
}

/// Result type alias for run-metrics operations.
pub type Result<T> = std::result::Result<T, RunMetricsError>;

/// Extension trait for converting Option to RunMetricsError.
pub trait OptionExt<T> {
    /// Convert Option to Result with a missing field error.
    fn ok_or_missing_field(self, field: &str) -> Result<T>;

    /// Convert Option to Result with a missing age error.
    fn ok_or_missing_age(self) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing_field(self, field: &str) -> Result<T> {
        self.ok_or_else(|| RunMetricsError::MissingField {
            field: field.to_string(),
        })
    }

    fn ok_or_missing_age(self) -> Result<T> {
        self.ok_or(RunMetricsError::MissingAge)
    }
}
