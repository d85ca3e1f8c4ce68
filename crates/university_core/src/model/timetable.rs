//! Timetable read model.
//!
//! # Invariants
//! - Lessons are ordered by `(date ASC, timeslot_id ASC)`.
//! - Interval bounds are inclusive on both ends.
//! - An interval with `start > end` is empty, not invalid.

use crate::model::lesson::ScheduledLesson;
use crate::model::validation::{parse_date, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parses both bounds from `yyyy-MM-dd` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(parse_date(start)?, parse_date(end)?))
    }

    /// Single-day interval.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    pub interval: DateInterval,
    pub lessons: Vec<ScheduledLesson>,
}

impl Timetable {
    pub fn new(interval: DateInterval, lessons: Vec<ScheduledLesson>) -> Self {
        Self { interval, lessons }
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Lessons scheduled on one day, in timeslot order.
    pub fn lessons_on(&self, date: NaiveDate) -> impl Iterator<Item = &ScheduledLesson> {
        self.lessons.iter().filter(move |lesson| lesson.date == date)
    }
}

/// One line per lesson: `date | timeslot | course | classroom`.
impl Display for Timetable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for lesson in &self.lessons {
            writeln!(
                f,
                "{} | {} | {} | {}",
                lesson.date, lesson.timeslot.description, lesson.course.name, lesson.classroom.number
            )?;
        }
        Ok(())
    }
}
