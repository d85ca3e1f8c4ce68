//! University domain model.
//!
//! # Responsibility
//! - Define row, insert, reference and detail shapes for every entity.
//! - Validate caller input before it reaches storage.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never reused.
//! - A record type always carries exactly the columns its query selects.

pub mod classroom;
pub mod course;
pub mod faculty;
pub mod group;
pub mod lesson;
pub mod student;
pub mod teacher;
pub mod timeslot;
pub mod timetable;
pub mod validation;
