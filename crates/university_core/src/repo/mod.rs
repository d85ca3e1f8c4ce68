//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - One storage-access trait per entity family, plus the timetable
//!   read model.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Write paths validate input before any SQL mutation.
//! - Every failure is returned to the caller; nothing is logged and dropped.
//! - Single-row lookups return `NotFound` instead of an empty result.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::validation::ValidationError;
use log::error;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod classroom_repo;
pub mod course_repo;
pub mod faculty_repo;
pub mod group_repo;
pub mod lesson_repo;
pub mod student_repo;
pub mod teacher_repo;
pub mod timeslot_repo;
pub mod timetable_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error taxonomy shared by repositories and services.
#[derive(Debug)]
pub enum RepoError {
    /// No row matches the requested key.
    NotFound { entity: &'static str, key: String },
    /// Storage rejected the write: unknown foreign key, duplicate natural key
    /// or duplicate association.
    ConstraintViolation(String),
    /// Caller input failed validation or parsing.
    InvalidInput(ValidationError),
    /// Any other storage failure.
    StorageUnavailable(DbError),
    /// Persisted row cannot be mapped to a record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl RepoError {
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::StorageUnavailable(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::ConstraintViolation(_) => None,
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::StorageUnavailable(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(message.unwrap_or_else(|| failure.to_string()))
            }
            rusqlite::Error::FromSqlConversionFailure(column, _, err) => {
                Self::InvalidData(format!("column {column}: {err}"))
            }
            rusqlite::Error::InvalidColumnType(_, column, kind) => {
                Self::InvalidData(format!("column `{column}` has unexpected type {kind}"))
            }
            other => Self::StorageUnavailable(DbError::Sqlite(other)),
        }
    }
}

/// Converts a failed write into `RepoError` and records it.
pub(crate) fn write_failed(event: &'static str, err: impl Into<RepoError>) -> RepoError {
    let err = err.into();
    error!("event={event} module=repo status=error error={err}");
    err
}

/// Rejects connections that were not opened through `db::open_*`.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
