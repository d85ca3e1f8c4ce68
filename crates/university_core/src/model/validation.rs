//! Input validation shared by all entity write paths.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Date format accepted from callers (`yyyy-MM-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// chrono's `%Y` also takes signed and 5+ digit years; stored dates must
// compare correctly as text.
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Validation failure for caller-provided values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trim.
    BlankField(&'static str),
    /// Classroom capacity below zero.
    NegativeCapacity(i64),
    /// Date string is not ISO-8601 `yyyy-MM-dd`.
    InvalidDate(String),
    /// Timeslot range whose end is not after its start.
    InvalidTimeRange(String),
    /// Timeslot would break the id-follows-time ordering of timeslots.
    TimeslotOutOfOrder {
        description: String,
        neighbour: String,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::NegativeCapacity(value) => {
                write!(f, "capacity must not be negative, got {value}")
            }
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected yyyy-MM-dd")
            }
            Self::InvalidTimeRange(value) => {
                write!(f, "timeslot `{value}` must end after it starts")
            }
            Self::TimeslotOutOfOrder {
                description,
                neighbour,
            } => write!(
                f,
                "timeslot `{description}` is out of chronological order relative to `{neighbour}`"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Parses an ISO-8601 calendar date with a four-digit year.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if !DATE_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}
