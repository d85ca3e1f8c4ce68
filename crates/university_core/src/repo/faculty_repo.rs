//! Faculty repository contracts and SQLite implementation.

use crate::model::faculty::{Faculty, FacultyId, NewFaculty};
use crate::repo::{ensure_connection_ready, write_failed, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for faculties.
pub trait FacultyRepository {
    fn add(&self, faculty: &NewFaculty) -> RepoResult<FacultyId>;
    fn get_by_id(&self, id: FacultyId) -> RepoResult<Faculty>;
    fn get_all(&self) -> RepoResult<Vec<Faculty>>;
    fn update(&self, faculty: &Faculty) -> RepoResult<()>;
    /// Fails with `ConstraintViolation` while groups or teachers still
    /// reference the faculty.
    fn delete(&self, id: FacultyId) -> RepoResult<()>;
}

/// SQLite-backed faculty repository.
pub struct SqliteFacultyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFacultyRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["faculties"])?;
        Ok(Self { conn })
    }
}

impl FacultyRepository for SqliteFacultyRepository<'_> {
    fn add(&self, faculty: &NewFaculty) -> RepoResult<FacultyId> {
        faculty.validate()?;

        self.conn
            .execute(
                "INSERT INTO faculties (faculty_short_name, faculty_full_name) VALUES (?1, ?2);",
                params![faculty.short_name.as_str(), faculty.full_name.as_str()],
            )
            .map_err(|err| write_failed("faculty_add", err))?;

        let id = self.conn.last_insert_rowid();
        debug!("event=faculty_add module=repo status=ok faculty_id={id}");
        Ok(id)
    }

    fn get_by_id(&self, id: FacultyId) -> RepoResult<Faculty> {
        load_faculty(self.conn, id)
    }

    fn get_all(&self) -> RepoResult<Vec<Faculty>> {
        let mut stmt = self.conn.prepare(
            "SELECT faculty_id, faculty_short_name, faculty_full_name
             FROM faculties
             ORDER BY faculty_id ASC;",
        )?;
        let faculties = stmt
            .query_map([], map_faculty)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(faculties)
    }

    fn update(&self, faculty: &Faculty) -> RepoResult<()> {
        faculty.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE faculties
                 SET
                    faculty_short_name = ?1,
                    faculty_full_name = ?2
                 WHERE faculty_id = ?3;",
                params![
                    faculty.short_name.as_str(),
                    faculty.full_name.as_str(),
                    faculty.id
                ],
            )
            .map_err(|err| write_failed("faculty_update", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("faculty", faculty.id));
        }

        debug!(
            "event=faculty_update module=repo status=ok faculty_id={}",
            faculty.id
        );
        Ok(())
    }

    fn delete(&self, id: FacultyId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM faculties WHERE faculty_id = ?1;", [id])
            .map_err(|err| write_failed("faculty_delete", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("faculty", id));
        }

        debug!("event=faculty_delete module=repo status=ok faculty_id={id}");
        Ok(())
    }
}

/// Shared with group/teacher detail loading.
pub(crate) fn load_faculty(conn: &Connection, id: FacultyId) -> RepoResult<Faculty> {
    conn.query_row(
        "SELECT faculty_id, faculty_short_name, faculty_full_name
         FROM faculties
         WHERE faculty_id = ?1;",
        [id],
        map_faculty,
    )
    .optional()?
    .ok_or_else(|| RepoError::not_found("faculty", id))
}

fn map_faculty(row: &Row<'_>) -> rusqlite::Result<Faculty> {
    Ok(Faculty {
        id: row.get("faculty_id")?,
        short_name: row.get("faculty_short_name")?,
        full_name: row.get("faculty_full_name")?,
    })
}
