//! Group repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `groups`.
//! - Own the `groups_courses` association: assign and remove single pairs.
//!
//! # Invariants
//! - An association pair exists at most once; a second assign of the same
//!   pair is a constraint violation.
//! - `get_by_student` resolves the student's group and loads it in two
//!   separate statements with no transaction between them.

use crate::model::course::CourseId;
use crate::model::faculty::FacultyId;
use crate::model::group::{Group, GroupDetail, GroupId, NewGroup};
use crate::model::student::{Student, StudentId};
use crate::repo::course_repo::load_courses_by_group;
use crate::repo::faculty_repo::load_faculty;
use crate::repo::student_repo::load_students_by_group;
use crate::repo::{ensure_connection_ready, write_failed, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const GROUP_SELECT_SQL: &str = "SELECT
    group_id,
    group_name,
    faculty_id
FROM groups";

/// Repository interface for groups and their course assignments.
pub trait GroupRepository {
    fn add(&self, group: &NewGroup) -> RepoResult<GroupId>;
    /// Loads the group with faculty, assigned courses and students.
    fn get_by_id(&self, id: GroupId) -> RepoResult<GroupDetail>;
    fn get_all(&self) -> RepoResult<Vec<Group>>;
    fn get_by_faculty(&self, faculty_id: FacultyId) -> RepoResult<Vec<Group>>;
    /// Loads the group the student belongs to.
    fn get_by_student(&self, student_id: StudentId) -> RepoResult<GroupDetail>;
    fn get_students(&self, group_id: GroupId) -> RepoResult<Vec<Student>>;
    fn assign_course(&self, group_id: GroupId, course_id: CourseId) -> RepoResult<()>;
    fn remove_course(&self, group_id: GroupId, course_id: CourseId) -> RepoResult<()>;
    fn update(&self, group: &Group) -> RepoResult<()>;
    fn delete(&self, id: GroupId) -> RepoResult<()>;
}

/// SQLite-backed group repository.
pub struct SqliteGroupRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGroupRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["groups", "faculties", "students", "groups_courses"])?;
        Ok(Self { conn })
    }
}

impl GroupRepository for SqliteGroupRepository<'_> {
    fn add(&self, group: &NewGroup) -> RepoResult<GroupId> {
        group.validate()?;

        self.conn
            .execute(
                "INSERT INTO groups (group_name, faculty_id) VALUES (?1, ?2);",
                params![group.name.as_str(), group.faculty_id],
            )
            .map_err(|err| write_failed("group_add", err))?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=group_add module=repo status=ok group_id={} faculty_id={}",
            id, group.faculty_id
        );
        Ok(id)
    }

    fn get_by_id(&self, id: GroupId) -> RepoResult<GroupDetail> {
        let group = self
            .conn
            .query_row(
                &format!("{GROUP_SELECT_SQL} WHERE group_id = ?1;"),
                [id],
                map_group,
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found("group", id))?;

        Ok(GroupDetail {
            id: group.id,
            faculty: load_faculty(self.conn, group.faculty_id)?,
            courses: load_courses_by_group(self.conn, group.id)?,
            students: load_students_by_group(self.conn, group.id)?,
            name: group.name,
        })
    }

    fn get_all(&self) -> RepoResult<Vec<Group>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GROUP_SELECT_SQL} ORDER BY group_id ASC;"))?;
        let groups = stmt
            .query_map([], map_group)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(groups)
    }

    fn get_by_faculty(&self, faculty_id: FacultyId) -> RepoResult<Vec<Group>> {
        let mut stmt = self.conn.prepare(&format!(
            "{GROUP_SELECT_SQL} WHERE faculty_id = ?1 ORDER BY group_id ASC;"
        ))?;
        let groups = stmt
            .query_map([faculty_id], map_group)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(groups)
    }

    fn get_by_student(&self, student_id: StudentId) -> RepoResult<GroupDetail> {
        let group_id: GroupId = self
            .conn
            .query_row(
                "SELECT group_id FROM students WHERE student_id = ?1;",
                [student_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found("student", student_id))?;

        self.get_by_id(group_id)
    }

    fn get_students(&self, group_id: GroupId) -> RepoResult<Vec<Student>> {
        load_students_by_group(self.conn, group_id)
    }

    fn assign_course(&self, group_id: GroupId, course_id: CourseId) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO groups_courses (group_id, course_id) VALUES (?1, ?2);",
                params![group_id, course_id],
            )
            .map_err(|err| write_failed("group_assign_course", err))?;

        debug!(
            "event=group_assign_course module=repo status=ok group_id={} course_id={}",
            group_id, course_id
        );
        Ok(())
    }

    fn remove_course(&self, group_id: GroupId, course_id: CourseId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "DELETE FROM groups_courses WHERE group_id = ?1 AND course_id = ?2;",
                params![group_id, course_id],
            )
            .map_err(|err| write_failed("group_remove_course", err))?;

        if changed == 0 {
            return Err(RepoError::not_found(
                "group course",
                format!("group {group_id}, course {course_id}"),
            ));
        }

        debug!(
            "event=group_remove_course module=repo status=ok group_id={} course_id={}",
            group_id, course_id
        );
        Ok(())
    }

    fn update(&self, group: &Group) -> RepoResult<()> {
        group.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE groups
                 SET
                    group_name = ?1,
                    faculty_id = ?2
                 WHERE group_id = ?3;",
                params![group.name.as_str(), group.faculty_id, group.id],
            )
            .map_err(|err| write_failed("group_update", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("group", group.id));
        }

        debug!("event=group_update module=repo status=ok group_id={}", group.id);
        Ok(())
    }

    fn delete(&self, id: GroupId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM groups WHERE group_id = ?1;", [id])
            .map_err(|err| write_failed("group_delete", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("group", id));
        }

        debug!("event=group_delete module=repo status=ok group_id={id}");
        Ok(())
    }
}

pub(crate) fn map_group(row: &Row<'_>) -> rusqlite::Result<Group> {
    Ok(Group {
        id: row.get("group_id")?,
        name: row.get("group_name")?,
        faculty_id: row.get("faculty_id")?,
    })
}
