//! Student repository contracts and SQLite implementation.

use crate::model::group::{GroupId, GroupRef};
use crate::model::student::{NewStudent, Student, StudentDetail, StudentId};
use crate::repo::{ensure_connection_ready, write_failed, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for students.
pub trait StudentRepository {
    fn add(&self, student: &NewStudent) -> RepoResult<StudentId>;
    /// Loads the student joined with its group name.
    fn get_by_id(&self, id: StudentId) -> RepoResult<StudentDetail>;
    fn get_by_group(&self, group_id: GroupId) -> RepoResult<Vec<Student>>;
    fn count(&self) -> RepoResult<u64>;
    fn update(&self, student: &Student) -> RepoResult<()>;
    fn delete(&self, id: StudentId) -> RepoResult<()>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["students", "groups"])?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn add(&self, student: &NewStudent) -> RepoResult<StudentId> {
        student.validate()?;

        self.conn
            .execute(
                "INSERT INTO students (first_name, last_name, group_id) VALUES (?1, ?2, ?3);",
                params![
                    student.first_name.as_str(),
                    student.last_name.as_str(),
                    student.group_id
                ],
            )
            .map_err(|err| write_failed("student_add", err))?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=student_add module=repo status=ok student_id={} group_id={}",
            id, student.group_id
        );
        Ok(id)
    }

    fn get_by_id(&self, id: StudentId) -> RepoResult<StudentDetail> {
        self.conn
            .query_row(
                "SELECT
                    students.student_id AS student_id,
                    students.first_name AS first_name,
                    students.last_name AS last_name,
                    groups.group_id AS group_id,
                    groups.group_name AS group_name
                 FROM students
                 JOIN groups ON students.group_id = groups.group_id
                 WHERE students.student_id = ?1;",
                [id],
                |row| {
                    Ok(StudentDetail {
                        id: row.get("student_id")?,
                        first_name: row.get("first_name")?,
                        last_name: row.get("last_name")?,
                        group: GroupRef {
                            id: row.get("group_id")?,
                            name: row.get("group_name")?,
                        },
                    })
                },
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found("student", id))
    }

    fn get_by_group(&self, group_id: GroupId) -> RepoResult<Vec<Student>> {
        load_students_by_group(self.conn, group_id)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative student count {count}")))
    }

    fn update(&self, student: &Student) -> RepoResult<()> {
        student.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE students
                 SET
                    first_name = ?1,
                    last_name = ?2,
                    group_id = ?3
                 WHERE student_id = ?4;",
                params![
                    student.first_name.as_str(),
                    student.last_name.as_str(),
                    student.group_id,
                    student.id
                ],
            )
            .map_err(|err| write_failed("student_update", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("student", student.id));
        }

        debug!(
            "event=student_update module=repo status=ok student_id={}",
            student.id
        );
        Ok(())
    }

    fn delete(&self, id: StudentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE student_id = ?1;", [id])
            .map_err(|err| write_failed("student_delete", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("student", id));
        }

        debug!("event=student_delete module=repo status=ok student_id={id}");
        Ok(())
    }
}

pub(crate) fn load_students_by_group(
    conn: &Connection,
    group_id: GroupId,
) -> RepoResult<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT student_id, first_name, last_name, group_id
         FROM students
         WHERE group_id = ?1
         ORDER BY student_id ASC;",
    )?;
    let students = stmt
        .query_map([group_id], map_student)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(students)
}

fn map_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get("student_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        group_id: row.get("group_id")?,
    })
}
