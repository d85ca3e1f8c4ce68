//! Student records.

use crate::model::group::{GroupId, GroupRef};
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type StudentId = i64;

/// One row of `students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub group_id: GroupId,
}

/// Insert shape for [`Student`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub group_id: GroupId,
}

/// Student joined with the name of its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetail {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub group: GroupRef,
}

impl NewStudent {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        group_id: GroupId,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            group_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_names(&self.first_name, &self.last_name)
    }
}

impl Student {
    pub fn from_new(id: StudentId, new: NewStudent) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            group_id: new.group_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_names(&self.first_name, &self.last_name)
    }
}

pub(crate) fn validate_names(first_name: &str, last_name: &str) -> Result<(), ValidationError> {
    require_text("first_name", first_name)?;
    require_text("last_name", last_name)
}
