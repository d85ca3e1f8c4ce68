//! Student group records.
//!
//! # Invariants
//! - A group belongs to exactly one faculty.
//! - Course membership lives in `groups_courses`, never on the group row.

use crate::model::course::Course;
use crate::model::faculty::{Faculty, FacultyId};
use crate::model::student::Student;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type GroupId = i64;

/// One row of `groups`. The faculty is referenced by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub faculty_id: FacultyId,
}

/// Insert shape for [`Group`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
    pub faculty_id: FacultyId,
}

/// Group columns exposed by student joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: GroupId,
    pub name: String,
}

/// Fully loaded group: faculty, assigned courses and members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDetail {
    pub id: GroupId,
    pub name: String,
    pub faculty: Faculty,
    /// Ordered by course id.
    pub courses: Vec<Course>,
    /// Ordered by student id.
    pub students: Vec<Student>,
}

impl NewGroup {
    pub fn new(name: impl Into<String>, faculty_id: FacultyId) -> Self {
        Self {
            name: name.into(),
            faculty_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("group_name", &self.name)
    }
}

impl Group {
    pub fn from_new(id: GroupId, new: NewGroup) -> Self {
        Self {
            id,
            name: new.name,
            faculty_id: new.faculty_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("group_name", &self.name)
    }
}

impl GroupDetail {
    /// Drops the loaded associations and keeps the row shape.
    pub fn to_group(&self) -> Group {
        Group {
            id: self.id,
            name: self.name.clone(),
            faculty_id: self.faculty.id,
        }
    }
}
