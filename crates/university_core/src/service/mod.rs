//! Core use-case services.
//!
//! # Responsibility
//! - Turn primitive caller input (ids, date strings) into records.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Services return repository errors unchanged; parse failures surface as
//!   `RepoError::InvalidInput` before any repository call.

pub mod group_service;
pub mod lesson_service;
pub mod timetable_service;
