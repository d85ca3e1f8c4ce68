//! Course repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `courses`.
//! - Course lookups through the `groups_courses` association, including the
//!   set of courses a group is not assigned to yet.
//!
//! # Invariants
//! - List results are ordered by `course_id ASC`.

use crate::model::course::{Course, CourseDetail, CourseId, NewCourse};
use crate::model::group::GroupId;
use crate::model::teacher::{TeacherId, TeacherRef};
use crate::repo::group_repo::map_group;
use crate::repo::{ensure_connection_ready, write_failed, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const COURSE_SELECT_SQL: &str = "SELECT
    course_id,
    course_name,
    course_description,
    teacher_id
FROM courses";

/// Repository interface for courses.
pub trait CourseRepository {
    fn add(&self, course: &NewCourse) -> RepoResult<CourseId>;
    /// Loads the course with its teacher and assigned groups.
    fn get_by_id(&self, id: CourseId) -> RepoResult<CourseDetail>;
    fn get_all(&self) -> RepoResult<Vec<Course>>;
    fn get_by_teacher(&self, teacher_id: TeacherId) -> RepoResult<Vec<Course>>;
    /// Courses assigned to the group.
    fn get_by_group(&self, group_id: GroupId) -> RepoResult<Vec<Course>>;
    /// All courses minus the ones already assigned to the group.
    fn get_free_courses(&self, group_id: GroupId) -> RepoResult<Vec<Course>>;
    fn update(&self, course: &Course) -> RepoResult<()>;
    fn delete(&self, id: CourseId) -> RepoResult<()>;
}

/// SQLite-backed course repository.
pub struct SqliteCourseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCourseRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["courses", "teachers", "groups_courses"])?;
        Ok(Self { conn })
    }
}

impl CourseRepository for SqliteCourseRepository<'_> {
    fn add(&self, course: &NewCourse) -> RepoResult<CourseId> {
        course.validate()?;

        self.conn
            .execute(
                "INSERT INTO courses (course_name, course_description, teacher_id)
                 VALUES (?1, ?2, ?3);",
                params![
                    course.name.as_str(),
                    course.description.as_str(),
                    course.teacher_id
                ],
            )
            .map_err(|err| write_failed("course_add", err))?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=course_add module=repo status=ok course_id={} teacher_id={}",
            id, course.teacher_id
        );
        Ok(id)
    }

    fn get_by_id(&self, id: CourseId) -> RepoResult<CourseDetail> {
        let (course, teacher) = self
            .conn
            .query_row(
                "SELECT
                    courses.course_id AS course_id,
                    courses.course_name AS course_name,
                    courses.course_description AS course_description,
                    courses.teacher_id AS teacher_id,
                    teachers.first_name AS first_name,
                    teachers.last_name AS last_name
                 FROM courses
                 JOIN teachers ON courses.teacher_id = teachers.teacher_id
                 WHERE courses.course_id = ?1;",
                [id],
                |row| {
                    let course = map_course(row)?;
                    let teacher = TeacherRef {
                        id: row.get("teacher_id")?,
                        first_name: row.get("first_name")?,
                        last_name: row.get("last_name")?,
                    };
                    Ok((course, teacher))
                },
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found("course", id))?;

        let mut stmt = self.conn.prepare(
            "SELECT group_id, group_name, faculty_id
             FROM groups
             WHERE group_id IN (SELECT group_id FROM groups_courses WHERE course_id = ?1)
             ORDER BY group_id ASC;",
        )?;
        let groups = stmt
            .query_map([id], map_group)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(CourseDetail {
            id: course.id,
            name: course.name,
            description: course.description,
            teacher,
            groups,
        })
    }

    fn get_all(&self) -> RepoResult<Vec<Course>> {
        query_courses(
            self.conn,
            &format!("{COURSE_SELECT_SQL} ORDER BY course_id ASC;"),
            None,
        )
    }

    fn get_by_teacher(&self, teacher_id: TeacherId) -> RepoResult<Vec<Course>> {
        load_courses_by_teacher(self.conn, teacher_id)
    }

    fn get_by_group(&self, group_id: GroupId) -> RepoResult<Vec<Course>> {
        load_courses_by_group(self.conn, group_id)
    }

    fn get_free_courses(&self, group_id: GroupId) -> RepoResult<Vec<Course>> {
        query_courses(
            self.conn,
            &format!(
                "{COURSE_SELECT_SQL}
                 WHERE course_id NOT IN
                    (SELECT groups_courses.course_id FROM groups_courses WHERE group_id = ?1)
                 ORDER BY course_id ASC;"
            ),
            Some(group_id),
        )
    }

    fn update(&self, course: &Course) -> RepoResult<()> {
        course.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE courses
                 SET
                    course_name = ?1,
                    course_description = ?2,
                    teacher_id = ?3
                 WHERE course_id = ?4;",
                params![
                    course.name.as_str(),
                    course.description.as_str(),
                    course.teacher_id,
                    course.id
                ],
            )
            .map_err(|err| write_failed("course_update", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("course", course.id));
        }

        debug!(
            "event=course_update module=repo status=ok course_id={}",
            course.id
        );
        Ok(())
    }

    fn delete(&self, id: CourseId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM courses WHERE course_id = ?1;", [id])
            .map_err(|err| write_failed("course_delete", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("course", id));
        }

        debug!("event=course_delete module=repo status=ok course_id={id}");
        Ok(())
    }
}

pub(crate) fn load_courses_by_teacher(
    conn: &Connection,
    teacher_id: TeacherId,
) -> RepoResult<Vec<Course>> {
    query_courses(
        conn,
        &format!("{COURSE_SELECT_SQL} WHERE teacher_id = ?1 ORDER BY course_id ASC;"),
        Some(teacher_id),
    )
}

pub(crate) fn load_courses_by_group(
    conn: &Connection,
    group_id: GroupId,
) -> RepoResult<Vec<Course>> {
    query_courses(
        conn,
        "SELECT
            courses.course_id AS course_id,
            courses.course_name AS course_name,
            courses.course_description AS course_description,
            courses.teacher_id AS teacher_id
         FROM groups_courses
         JOIN courses ON groups_courses.course_id = courses.course_id
         WHERE groups_courses.group_id = ?1
         ORDER BY courses.course_id ASC;",
        Some(group_id),
    )
}

fn query_courses(conn: &Connection, sql: &str, key: Option<i64>) -> RepoResult<Vec<Course>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = match key {
        Some(key) => stmt.query([key])?,
        None => stmt.query([])?,
    };

    let mut courses = Vec::new();
    while let Some(row) = rows.next()? {
        courses.push(map_course(row)?);
    }
    Ok(courses)
}

fn map_course(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get("course_id")?,
        name: row.get("course_name")?,
        description: row.get("course_description")?,
        teacher_id: row.get("teacher_id")?,
    })
}
