//! Teacher repository contracts and SQLite implementation.

use crate::model::faculty::FacultyId;
use crate::model::teacher::{NewTeacher, Teacher, TeacherDetail, TeacherId};
use crate::repo::course_repo::load_courses_by_teacher;
use crate::repo::faculty_repo::load_faculty;
use crate::repo::{ensure_connection_ready, write_failed, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const TEACHER_SELECT_SQL: &str = "SELECT
    teacher_id,
    first_name,
    last_name,
    faculty_id
FROM teachers";

/// Repository interface for teachers.
pub trait TeacherRepository {
    fn add(&self, teacher: &NewTeacher) -> RepoResult<TeacherId>;
    /// Loads the teacher with faculty and authored courses.
    fn get_by_id(&self, id: TeacherId) -> RepoResult<TeacherDetail>;
    fn get_all(&self) -> RepoResult<Vec<Teacher>>;
    fn get_by_faculty(&self, faculty_id: FacultyId) -> RepoResult<Vec<Teacher>>;
    fn update(&self, teacher: &Teacher) -> RepoResult<()>;
    /// Fails with `ConstraintViolation` while the teacher still authors courses.
    fn delete(&self, id: TeacherId) -> RepoResult<()>;
}

/// SQLite-backed teacher repository.
pub struct SqliteTeacherRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeacherRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["teachers", "faculties", "courses"])?;
        Ok(Self { conn })
    }
}

impl TeacherRepository for SqliteTeacherRepository<'_> {
    fn add(&self, teacher: &NewTeacher) -> RepoResult<TeacherId> {
        teacher.validate()?;

        self.conn
            .execute(
                "INSERT INTO teachers (first_name, last_name, faculty_id) VALUES (?1, ?2, ?3);",
                params![
                    teacher.first_name.as_str(),
                    teacher.last_name.as_str(),
                    teacher.faculty_id
                ],
            )
            .map_err(|err| write_failed("teacher_add", err))?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=teacher_add module=repo status=ok teacher_id={} faculty_id={}",
            id, teacher.faculty_id
        );
        Ok(id)
    }

    fn get_by_id(&self, id: TeacherId) -> RepoResult<TeacherDetail> {
        let teacher = self
            .conn
            .query_row(
                &format!("{TEACHER_SELECT_SQL} WHERE teacher_id = ?1;"),
                [id],
                map_teacher,
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found("teacher", id))?;

        Ok(TeacherDetail {
            id: teacher.id,
            faculty: load_faculty(self.conn, teacher.faculty_id)?,
            courses: load_courses_by_teacher(self.conn, teacher.id)?,
            first_name: teacher.first_name,
            last_name: teacher.last_name,
        })
    }

    fn get_all(&self) -> RepoResult<Vec<Teacher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEACHER_SELECT_SQL} ORDER BY teacher_id ASC;"))?;
        let teachers = stmt
            .query_map([], map_teacher)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(teachers)
    }

    fn get_by_faculty(&self, faculty_id: FacultyId) -> RepoResult<Vec<Teacher>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TEACHER_SELECT_SQL} WHERE faculty_id = ?1 ORDER BY teacher_id ASC;"
        ))?;
        let teachers = stmt
            .query_map([faculty_id], map_teacher)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(teachers)
    }

    fn update(&self, teacher: &Teacher) -> RepoResult<()> {
        teacher.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE teachers
                 SET
                    first_name = ?1,
                    last_name = ?2,
                    faculty_id = ?3
                 WHERE teacher_id = ?4;",
                params![
                    teacher.first_name.as_str(),
                    teacher.last_name.as_str(),
                    teacher.faculty_id,
                    teacher.id
                ],
            )
            .map_err(|err| write_failed("teacher_update", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("teacher", teacher.id));
        }

        debug!(
            "event=teacher_update module=repo status=ok teacher_id={}",
            teacher.id
        );
        Ok(())
    }

    fn delete(&self, id: TeacherId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM teachers WHERE teacher_id = ?1;", [id])
            .map_err(|err| write_failed("teacher_delete", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("teacher", id));
        }

        debug!("event=teacher_delete module=repo status=ok teacher_id={id}");
        Ok(())
    }
}

fn map_teacher(row: &Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get("teacher_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        faculty_id: row.get("faculty_id")?,
    })
}
