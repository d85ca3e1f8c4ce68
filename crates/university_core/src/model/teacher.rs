//! Teacher records.

use crate::model::course::Course;
use crate::model::faculty::{Faculty, FacultyId};
use crate::model::student::validate_names;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

pub type TeacherId = i64;

/// One row of `teachers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub first_name: String,
    pub last_name: String,
    pub faculty_id: FacultyId,
}

/// Insert shape for [`Teacher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub faculty_id: FacultyId,
}

/// Teacher columns exposed by course joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRef {
    pub id: TeacherId,
    pub first_name: String,
    pub last_name: String,
}

/// Teacher with faculty and authored courses loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherDetail {
    pub id: TeacherId,
    pub first_name: String,
    pub last_name: String,
    pub faculty: Faculty,
    /// Ordered by course id.
    pub courses: Vec<Course>,
}

impl NewTeacher {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        faculty_id: FacultyId,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            faculty_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_names(&self.first_name, &self.last_name)
    }
}

impl Teacher {
    pub fn from_new(id: TeacherId, new: NewTeacher) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            faculty_id: new.faculty_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_names(&self.first_name, &self.last_name)
    }
}
