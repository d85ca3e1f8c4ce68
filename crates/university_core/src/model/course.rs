//! Course records.
//!
//! # Invariants
//! - A course is authored by exactly one teacher.
//! - A course may be shared by many groups through `groups_courses`.

use crate::model::group::Group;
use crate::model::teacher::{TeacherId, TeacherRef};
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type CourseId = i64;

/// One row of `courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    /// Free text, may be empty.
    pub description: String,
    pub teacher_id: TeacherId,
}

/// Insert shape for [`Course`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    pub name: String,
    pub description: String,
    pub teacher_id: TeacherId,
}

/// Course columns exposed by timetable joins: id and name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: CourseId,
    pub name: String,
}

/// Course with its teacher and the groups it is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetail {
    pub id: CourseId,
    pub name: String,
    pub description: String,
    pub teacher: TeacherRef,
    /// Ordered by group id.
    pub groups: Vec<Group>,
}

impl NewCourse {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        teacher_id: TeacherId,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            teacher_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("course_name", &self.name)
    }
}

impl Course {
    pub fn from_new(id: CourseId, new: NewCourse) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            teacher_id: new.teacher_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("course_name", &self.name)
    }
}
