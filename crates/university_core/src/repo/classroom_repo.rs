//! Classroom repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `classroom_number` is a unique natural key.
//! - Deleting a classroom still referenced by lessons is a constraint
//!   violation.

use crate::model::classroom::{Classroom, ClassroomId, NewClassroom};
use crate::repo::{ensure_connection_ready, write_failed, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CLASSROOM_SELECT_SQL: &str = "SELECT
    classroom_id,
    classroom_number,
    capacity
FROM classrooms";

/// Repository interface for classrooms.
pub trait ClassroomRepository {
    fn add(&self, classroom: &NewClassroom) -> RepoResult<ClassroomId>;
    fn get_by_id(&self, id: ClassroomId) -> RepoResult<Classroom>;
    /// Looks up a classroom by its room number.
    fn get_by_number(&self, number: &str) -> RepoResult<Classroom>;
    fn get_all(&self) -> RepoResult<Vec<Classroom>>;
    fn update(&self, classroom: &Classroom) -> RepoResult<()>;
    fn delete(&self, id: ClassroomId) -> RepoResult<()>;
}

/// SQLite-backed classroom repository.
pub struct SqliteClassroomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClassroomRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["classrooms"])?;
        Ok(Self { conn })
    }
}

impl ClassroomRepository for SqliteClassroomRepository<'_> {
    fn add(&self, classroom: &NewClassroom) -> RepoResult<ClassroomId> {
        classroom.validate()?;

        self.conn
            .execute(
                "INSERT INTO classrooms (classroom_number, capacity) VALUES (?1, ?2);",
                params![classroom.number.as_str(), classroom.capacity],
            )
            .map_err(|err| write_failed("classroom_add", err))?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=classroom_add module=repo status=ok classroom_id={} number={}",
            id, classroom.number
        );
        Ok(id)
    }

    fn get_by_id(&self, id: ClassroomId) -> RepoResult<Classroom> {
        self.conn
            .query_row(
                &format!("{CLASSROOM_SELECT_SQL} WHERE classroom_id = ?1;"),
                [id],
                map_classroom,
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found("classroom", id))
    }

    fn get_by_number(&self, number: &str) -> RepoResult<Classroom> {
        self.conn
            .query_row(
                &format!("{CLASSROOM_SELECT_SQL} WHERE classroom_number = ?1;"),
                [number],
                map_classroom,
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found("classroom", number))
    }

    fn get_all(&self) -> RepoResult<Vec<Classroom>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLASSROOM_SELECT_SQL} ORDER BY classroom_id ASC;"))?;
        let classrooms = stmt
            .query_map([], map_classroom)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(classrooms)
    }

    fn update(&self, classroom: &Classroom) -> RepoResult<()> {
        classroom.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE classrooms
                 SET
                    classroom_number = ?1,
                    capacity = ?2
                 WHERE classroom_id = ?3;",
                params![classroom.number.as_str(), classroom.capacity, classroom.id],
            )
            .map_err(|err| write_failed("classroom_update", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("classroom", classroom.id));
        }

        debug!(
            "event=classroom_update module=repo status=ok classroom_id={}",
            classroom.id
        );
        Ok(())
    }

    fn delete(&self, id: ClassroomId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM classrooms WHERE classroom_id = ?1;", [id])
            .map_err(|err| write_failed("classroom_delete", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("classroom", id));
        }

        debug!("event=classroom_delete module=repo status=ok classroom_id={id}");
        Ok(())
    }
}

fn map_classroom(row: &Row<'_>) -> rusqlite::Result<Classroom> {
    Ok(Classroom {
        id: row.get("classroom_id")?,
        number: row.get("classroom_number")?,
        capacity: row.get("capacity")?,
    })
}
