//! Clock-time values and the time-string parser shared by every calculator.
//!
//! Times are entered as `MM:SS` or `HH:MM:SS`. Two related operations exist:
//! - [`validate_time`] / [`validate`] apply the full input policy (characters,
//!   segment ranges, one minute to ten hours) and report a user-facing message
//! - [`parse_seconds`] only splits and adds up the segments, for strings that
//!   are already known to be well formed
//!
//! ## Example
//! ```rust
//! use run_metrics::duration::{parse_seconds, validate};
//!
//! assert_eq!(parse_seconds("1:23:45"), Some(5025));
//!
//! let result = validate("99:00", "race time");
//! assert!(!result.valid);
//! println!("{}", result.message);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TimeFormatError, TimeUnit};

/// Shortest accepted time input (one minute)
pub const MIN_VALID_SECONDS: u32 = 60;

/// Longest accepted time input (ten hours)
pub const MAX_VALID_SECONDS: u32 = 36_000;

/// Longest sanitized time input, the length of `HH:MM:SS`
pub const MAX_TIME_INPUT_LEN: usize = 8;

const MM_SS_LIMITS: [(TimeUnit, u32); 2] = [(TimeUnit::Minutes, 59), (TimeUnit::Seconds, 59)];
const HH_MM_SS_LIMITS: [(TimeUnit, u32); 3] = [
    (TimeUnit::Hours, 23),
    (TimeUnit::Minutes, 59),
    (TimeUnit::Seconds, 59),
];

/// A whole number of seconds, displayed as a clock time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Duration {
    pub seconds: u32,
}

impl Duration {
    /// Create a duration from whole seconds.
    pub fn from_secs(seconds: u32) -> Self {
        Self { seconds }
    }

    /// Create a duration from fractional seconds, truncating toward zero.
    /// Negative and NaN inputs become zero.
    pub fn from_secs_floor(seconds: f64) -> Self {
        // `as` saturates and maps NaN to 0
        Self {
            seconds: seconds.floor() as u32,
        }
    }

    pub fn as_secs(&self) -> u32 {
        self.seconds
    }

    /// Hours component of the clock form.
    pub fn hours(&self) -> u32 {
        self.seconds / 3600
    }

    /// Minutes component of the clock form (0-59).
    pub fn minutes(&self) -> u32 {
        (self.seconds % 3600) / 60
    }

    /// Seconds component of the clock form (0-59).
    pub fn secs(&self) -> u32 {
        self.seconds % 60
    }

    /// Format as a pace, `M:SS` with unbounded minutes (e.g. `7:05`).
    pub fn format_pace(&self) -> String {
        format!("{}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

impl fmt::Display for Duration {
    /// `H:MM:SS` from one hour upwards, `M:SS` below.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours() > 0 {
            write!(f, "{}:{:02}:{:02}", self.hours(), self.minutes(), self.secs())
        } else {
            write!(f, "{}:{:02}", self.minutes(), self.secs())
        }
    }
}

/// Outcome of validating a time input.
///
/// `message` is empty if and only if `valid` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(error: &TimeFormatError) -> Self {
        Self {
            valid: false,
            message: error.to_string(),
        }
    }
}

impl<T> From<Result<T, TimeFormatError>> for ValidationResult {
    fn from(result: Result<T, TimeFormatError>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(e) => Self::invalid(&e),
        }
    }
}

/// Validate a time input and report the outcome with a user-facing message.
///
/// `field_label` names the input in the message (e.g. "5K time").
pub fn validate(input: &str, field_label: &str) -> ValidationResult {
    validate_time(input, field_label).into()
}

/// Validate a time input and return its duration.
///
/// Checks run in order and the first failure is returned:
/// blank input, characters other than digits and colons, segment count,
/// empty segments, unparseable numbers, per-unit ranges, and finally the
/// one-minute to ten-hour window.
pub fn validate_time(input: &str, field_label: &str) -> Result<Duration, TimeFormatError> {
    let field = || field_label.to_string();
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(TimeFormatError::EmptyInput { field: field() });
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit() || c == ':') {
        return Err(TimeFormatError::InvalidCharacters { field: field() });
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(TimeFormatError::BadSegmentCount {
            field: field(),
            segments: parts.len(),
        });
    }
    if parts.iter().any(|p| p.is_empty()) {
        return Err(TimeFormatError::EmptySegment { field: field() });
    }

    let values = parts
        .iter()
        .map(|p| p.parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| TimeFormatError::InvalidNumber { field: field() })?;

    let limits: &[(TimeUnit, u32)] = if values.len() == 2 {
        &MM_SS_LIMITS
    } else {
        &HH_MM_SS_LIMITS
    };
    for (i, (&value, &(unit, max))) in values.iter().zip(limits).enumerate() {
        if value > max {
            return Err(TimeFormatError::OutOfRange {
                unit,
                max,
                value,
                leading: i == 0,
            });
        }
    }

    let seconds =
        total_seconds(&values).ok_or_else(|| TimeFormatError::InvalidNumber { field: field() })?;
    if seconds < MIN_VALID_SECONDS {
        return Err(TimeFormatError::TooShort {
            field: field(),
            seconds,
        });
    }
    if seconds > MAX_VALID_SECONDS {
        return Err(TimeFormatError::TooLong {
            field: field(),
            seconds,
        });
    }

    Ok(Duration::from_secs(seconds))
}

/// Convert `MM:SS` or `HH:MM:SS` to seconds without any range policy.
///
/// Returns `None` when the string does not have 2 or 3 numeric segments.
pub fn parse_seconds(input: &str) -> Option<u32> {
    let values = input
        .trim()
        .split(':')
        .map(|p| p.parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    total_seconds(&values)
}

fn total_seconds(values: &[u32]) -> Option<u32> {
    match *values {
        [minutes, seconds] => minutes.checked_mul(60)?.checked_add(seconds),
        [hours, minutes, seconds] => hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(seconds),
        _ => None,
    }
}

/// Clean up raw keyboard or clipboard input for a time field.
///
/// Drops everything but digits and colons, then truncates to
/// [`MAX_TIME_INPUT_LEN`] characters.
pub fn sanitize_time_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .take(MAX_TIME_INPUT_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("25:30"), Some(1530));
        assert_eq!(parse_seconds("1:23:45"), Some(5025));
        assert_eq!(parse_seconds(" 20:00 "), Some(1200));
        // No range policy
        assert_eq!(parse_seconds("99:99"), Some(99 * 60 + 99));
        assert_eq!(parse_seconds("0:30"), Some(30));
    }

    #[test]
    fn test_parse_seconds_rejects_bad_structure() {
        assert_eq!(parse_seconds("1530"), None);
        assert_eq!(parse_seconds("1:2:3:4"), None);
        assert_eq!(parse_seconds("::30"), None);
        assert_eq!(parse_seconds("ab:cd"), None);
    }

    #[test]
    fn test_validate_accepts_both_formats() {
        assert!(validate("25:30", "time").valid);
        assert!(validate("1:23:45", "time").valid);
        assert!(validate("  3:15:00 ", "time").valid);
        assert_eq!(validate("25:30", "time").message, "");
    }

    #[test]
    fn test_validate_empty_input() {
        let result = validate("   ", "5K time");
        assert!(!result.valid);
        assert_eq!(result.message, "Please enter a 5K time");
    }

    #[test]
    fn test_validate_invalid_characters() {
        assert!(matches!(
            validate_time("25.30", "time"),
            Err(TimeFormatError::InvalidCharacters { .. })
        ));
        assert!(matches!(
            validate_time("-1:00", "time"),
            Err(TimeFormatError::InvalidCharacters { .. })
        ));
    }

    #[test]
    fn test_validate_segment_count() {
        assert!(matches!(
            validate_time("1530", "time"),
            Err(TimeFormatError::BadSegmentCount { segments: 1, .. })
        ));
        assert!(matches!(
            validate_time("1:00:00:00", "time"),
            Err(TimeFormatError::BadSegmentCount { segments: 4, .. })
        ));
    }

    #[test]
    fn test_validate_empty_segment() {
        let result = validate("::30", "time");
        assert!(!result.valid);
        assert!(result.message.contains("empty parts"));
        assert!(matches!(
            validate_time("25:", "time"),
            Err(TimeFormatError::EmptySegment { .. })
        ));
    }

    #[test]
    fn test_validate_number_overflow() {
        assert!(matches!(
            validate_time("99999999999:00", "time"),
            Err(TimeFormatError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_validate_ranges() {
        assert_eq!(
            validate_time("99:00", "time"),
            Err(TimeFormatError::OutOfRange {
                unit: TimeUnit::Minutes,
                max: 59,
                value: 99,
                leading: true,
            })
        );
        assert_eq!(
            validate_time("20:60", "time"),
            Err(TimeFormatError::OutOfRange {
                unit: TimeUnit::Seconds,
                max: 59,
                value: 60,
                leading: false,
            })
        );
        assert_eq!(
            validate_time("24:00:00", "time"),
            Err(TimeFormatError::OutOfRange {
                unit: TimeUnit::Hours,
                max: 23,
                value: 24,
                leading: true,
            })
        );
        assert!(matches!(
            validate_time("1:75:00", "time"),
            Err(TimeFormatError::OutOfRange {
                unit: TimeUnit::Minutes,
                leading: false,
                ..
            })
        ));
    }

    #[test]
    fn test_range_messages_name_layout_on_first_segment() {
        assert_eq!(
            validate("99:00", "time").message,
            "Minutes cannot exceed 59 in MM:SS format"
        );
        assert_eq!(
            validate("24:00:00", "time").message,
            "Hours cannot exceed 23 in HH:MM:SS format"
        );
        assert_eq!(validate("1:75:00", "time").message, "Minutes cannot exceed 59");
        assert_eq!(validate("20:60", "time").message, "Seconds cannot exceed 59");
    }

    #[test]
    fn test_validate_length_window() {
        assert!(matches!(
            validate_time("0:59", "time"),
            Err(TimeFormatError::TooShort { seconds: 59, .. })
        ));
        assert_eq!(validate_time("1:00", "time"), Ok(Duration::from_secs(60)));
        assert_eq!(
            validate_time("10:00:00", "time"),
            Ok(Duration::from_secs(36_000))
        );
        assert!(matches!(
            validate_time("10:00:01", "time"),
            Err(TimeFormatError::TooLong { seconds: 36_001, .. })
        ));
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(Duration::from_secs(2521).to_string(), "42:01");
        assert_eq!(Duration::from_secs(65).to_string(), "1:05");
        assert_eq!(Duration::from_secs(3600).to_string(), "1:00:00");
        assert_eq!(Duration::from_secs(5025).to_string(), "1:23:45");
    }

    #[test]
    fn test_format_pace_keeps_minutes() {
        assert_eq!(Duration::from_secs(425).format_pace(), "7:05");
        assert_eq!(Duration::from_secs(3725).format_pace(), "62:05");
    }

    #[test]
    fn test_from_secs_floor() {
        assert_eq!(Duration::from_secs_floor(2521.99).as_secs(), 2521);
        assert_eq!(Duration::from_secs_floor(-3.0).as_secs(), 0);
        assert_eq!(Duration::from_secs_floor(f64::NAN).as_secs(), 0);
    }

    #[test]
    fn test_sanitize_time_input() {
        assert_eq!(sanitize_time_input("25m:30s"), "25:30");
        assert_eq!(sanitize_time_input("01:23:45:67"), "01:23:45");
        assert_eq!(sanitize_time_input(""), "");
    }
}
