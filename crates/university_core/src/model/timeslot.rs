//! Timeslot records and the within-day ordering rule.
//!
//! # Invariants
//! - Timetables order lessons of one day by `timeslot_id`, so ids must follow
//!   time of day.
//! - The rule is checked only for descriptions shaped like `HH:MM-HH:MM`;
//!   free-form descriptions are accepted as-is.

use crate::model::validation::{require_text, ValidationError};
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub type TimeslotId = i64;

static TIME_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*-\s*(\d{1,2}):(\d{2})\s*$")
        .expect("valid time range regex")
});

/// One row of `timeslots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeslot {
    pub id: TimeslotId,
    /// Human readable label, usually `HH:MM-HH:MM`.
    pub description: String,
}

/// Insert shape for [`Timeslot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimeslot {
    pub description: String,
}

impl NewTimeslot {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_description(&self.description)
    }
}

impl Timeslot {
    pub fn from_new(id: TimeslotId, new: NewTimeslot) -> Self {
        Self {
            id,
            description: new.description,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_description(&self.description)
    }

    /// Start time when the description is a time range.
    pub fn starts_at(&self) -> Option<NaiveTime> {
        parse_time_range(&self.description).map(|(start, _)| start)
    }
}

/// Parses `HH:MM-HH:MM`. Returns `None` for any other shape or for
/// out-of-range clock values.
pub fn parse_time_range(description: &str) -> Option<(NaiveTime, NaiveTime)> {
    let caps = TIME_RANGE_RE.captures(description)?;
    let field = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());
    let start = NaiveTime::from_hms_opt(field(1)?, field(2)?, 0)?;
    let end = NaiveTime::from_hms_opt(field(3)?, field(4)?, 0)?;
    Some((start, end))
}

/// Checks that a timeslot positioned between `earlier` and `later` (by id)
/// keeps starting times strictly increasing with id.
pub fn ensure_chronological(
    description: &str,
    earlier: &[Timeslot],
    later: &[Timeslot],
) -> Result<(), ValidationError> {
    let Some((start, _)) = parse_time_range(description) else {
        return Ok(());
    };

    let out_of_order = |neighbour: &Timeslot| ValidationError::TimeslotOutOfOrder {
        description: description.to_string(),
        neighbour: neighbour.description.clone(),
    };

    for slot in earlier {
        if slot.starts_at().is_some_and(|other| other >= start) {
            return Err(out_of_order(slot));
        }
    }
    for slot in later {
        if slot.starts_at().is_some_and(|other| other <= start) {
            return Err(out_of_order(slot));
        }
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    require_text("timeslot_description", description)?;
    if let Some((start, end)) = parse_time_range(description) {
        if end <= start {
            return Err(ValidationError::InvalidTimeRange(description.to_string()));
        }
    }
    Ok(())
}
