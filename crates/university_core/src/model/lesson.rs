//! Lesson records.
//!
//! # Invariants
//! - A lesson always references one timeslot, one course and one classroom.

use crate::model::classroom::{ClassroomId, ClassroomRef};
use crate::model::course::{Course, CourseId, CourseRef};
use crate::model::timeslot::{Timeslot, TimeslotId};
use crate::model::validation::{parse_date, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type LessonId = i64;

/// One row of `lessons`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub date: NaiveDate,
    pub timeslot_id: TimeslotId,
    pub course_id: CourseId,
    pub classroom_id: ClassroomId,
}

/// Insert shape for [`Lesson`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLesson {
    pub date: NaiveDate,
    pub timeslot_id: TimeslotId,
    pub course_id: CourseId,
    pub classroom_id: ClassroomId,
}

/// Lesson as loaded by id: timeslot, course and classroom number joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDetail {
    pub id: LessonId,
    pub date: NaiveDate,
    pub timeslot: Timeslot,
    pub course: Course,
    pub classroom: ClassroomRef,
}

/// Timetable entry. Carries only what a timetable line shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledLesson {
    pub id: LessonId,
    pub date: NaiveDate,
    pub timeslot: Timeslot,
    pub course: CourseRef,
    pub classroom: ClassroomRef,
}

impl NewLesson {
    /// Builds a lesson from primitive caller input.
    ///
    /// # Errors
    /// - `ValidationError::InvalidDate` when `date` is not `yyyy-MM-dd`.
    pub fn parse(
        date: &str,
        timeslot_id: TimeslotId,
        course_id: CourseId,
        classroom_id: ClassroomId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            date: parse_date(date)?,
            timeslot_id,
            course_id,
            classroom_id,
        })
    }
}

impl Lesson {
    pub fn from_new(id: LessonId, new: NewLesson) -> Self {
        Self {
            id,
            date: new.date,
            timeslot_id: new.timeslot_id,
            course_id: new.course_id,
            classroom_id: new.classroom_id,
        }
    }
}

impl LessonDetail {
    pub fn to_lesson(&self) -> Lesson {
        Lesson {
            id: self.id,
            date: self.date,
            timeslot_id: self.timeslot.id,
            course_id: self.course.id,
            classroom_id: self.classroom.id,
        }
    }
}
