//! Classroom records.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type ClassroomId = i64;

/// One row of `classrooms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: ClassroomId,
    /// Room number as printed on the door. Unique, may contain letters.
    pub number: String,
    pub capacity: i64,
}

/// Insert shape for [`Classroom`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClassroom {
    pub number: String,
    pub capacity: i64,
}

/// Classroom columns exposed by lesson joins: no capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomRef {
    pub id: ClassroomId,
    pub number: String,
}

impl NewClassroom {
    pub fn new(number: impl Into<String>, capacity: i64) -> Self {
        Self {
            number: number.into(),
            capacity,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.number, self.capacity)
    }
}

impl Classroom {
    pub fn from_new(id: ClassroomId, new: NewClassroom) -> Self {
        Self {
            id,
            number: new.number,
            capacity: new.capacity,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.number, self.capacity)
    }
}

fn validate_fields(number: &str, capacity: i64) -> Result<(), ValidationError> {
    require_text("classroom_number", number)?;
    if capacity < 0 {
        return Err(ValidationError::NegativeCapacity(capacity));
    }
    Ok(())
}
