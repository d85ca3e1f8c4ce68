//! Faculty records.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type FacultyId = i64;

/// One row of `faculties`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    /// Natural key, unique across faculties.
    pub short_name: String,
    pub full_name: String,
}

/// Insert shape for [`Faculty`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFaculty {
    pub short_name: String,
    pub full_name: String,
}

impl NewFaculty {
    pub fn new(short_name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            full_name: full_name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_names(&self.short_name, &self.full_name)
    }
}

impl Faculty {
    /// Combines a storage-assigned id with the inserted fields.
    pub fn from_new(id: FacultyId, new: NewFaculty) -> Self {
        Self {
            id,
            short_name: new.short_name,
            full_name: new.full_name,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_names(&self.short_name, &self.full_name)
    }
}

fn validate_names(short_name: &str, full_name: &str) -> Result<(), ValidationError> {
    require_text("faculty_short_name", short_name)?;
    require_text("faculty_full_name", full_name)
}
