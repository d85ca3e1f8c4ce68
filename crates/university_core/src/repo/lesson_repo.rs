//! Lesson repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `lesson_date` is stored as `yyyy-MM-dd` text so that range filters
//!   compare lexicographically in date order.
//! - Unknown timeslot/course/classroom ids are rejected by foreign keys.

use crate::model::classroom::ClassroomRef;
use crate::model::course::Course;
use crate::model::lesson::{Lesson, LessonDetail, LessonId, NewLesson};
use crate::model::timeslot::Timeslot;
use crate::repo::{ensure_connection_ready, write_failed, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for lessons.
pub trait LessonRepository {
    fn add(&self, lesson: &NewLesson) -> RepoResult<LessonId>;
    /// Loads the lesson with timeslot, course and classroom number joined in.
    fn get_by_id(&self, id: LessonId) -> RepoResult<LessonDetail>;
    fn update(&self, lesson: &Lesson) -> RepoResult<()>;
    fn delete(&self, id: LessonId) -> RepoResult<()>;
}

/// SQLite-backed lesson repository.
pub struct SqliteLessonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLessonRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["lessons", "timeslots", "courses", "classrooms"])?;
        Ok(Self { conn })
    }
}

impl LessonRepository for SqliteLessonRepository<'_> {
    fn add(&self, lesson: &NewLesson) -> RepoResult<LessonId> {
        self.conn
            .execute(
                "INSERT INTO lessons (lesson_date, timeslot_id, course_id, classroom_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    lesson.date,
                    lesson.timeslot_id,
                    lesson.course_id,
                    lesson.classroom_id
                ],
            )
            .map_err(|err| write_failed("lesson_add", err))?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=lesson_add module=repo status=ok lesson_id={} date={} course_id={}",
            id, lesson.date, lesson.course_id
        );
        Ok(id)
    }

    fn get_by_id(&self, id: LessonId) -> RepoResult<LessonDetail> {
        self.conn
            .query_row(
                "SELECT
                    lessons.lesson_id AS lesson_id,
                    lessons.lesson_date AS lesson_date,
                    timeslots.timeslot_id AS timeslot_id,
                    timeslots.timeslot_description AS timeslot_description,
                    courses.course_id AS course_id,
                    courses.course_name AS course_name,
                    courses.course_description AS course_description,
                    courses.teacher_id AS teacher_id,
                    classrooms.classroom_id AS classroom_id,
                    classrooms.classroom_number AS classroom_number
                 FROM lessons
                 JOIN timeslots ON lessons.timeslot_id = timeslots.timeslot_id
                 JOIN courses ON lessons.course_id = courses.course_id
                 JOIN classrooms ON lessons.classroom_id = classrooms.classroom_id
                 WHERE lessons.lesson_id = ?1;",
                [id],
                |row| {
                    Ok(LessonDetail {
                        id: row.get("lesson_id")?,
                        date: row.get("lesson_date")?,
                        timeslot: Timeslot {
                            id: row.get("timeslot_id")?,
                            description: row.get("timeslot_description")?,
                        },
                        course: Course {
                            id: row.get("course_id")?,
                            name: row.get("course_name")?,
                            description: row.get("course_description")?,
                            teacher_id: row.get("teacher_id")?,
                        },
                        classroom: ClassroomRef {
                            id: row.get("classroom_id")?,
                            number: row.get("classroom_number")?,
                        },
                    })
                },
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found("lesson", id))
    }

    fn update(&self, lesson: &Lesson) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE lessons
                 SET
                    lesson_date = ?1,
                    course_id = ?2,
                    timeslot_id = ?3,
                    classroom_id = ?4
                 WHERE lesson_id = ?5;",
                params![
                    lesson.date,
                    lesson.course_id,
                    lesson.timeslot_id,
                    lesson.classroom_id,
                    lesson.id
                ],
            )
            .map_err(|err| write_failed("lesson_update", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("lesson", lesson.id));
        }

        debug!("event=lesson_update module=repo status=ok lesson_id={}", lesson.id);
        Ok(())
    }

    fn delete(&self, id: LessonId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM lessons WHERE lesson_id = ?1;", [id])
            .map_err(|err| write_failed("lesson_delete", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("lesson", id));
        }

        debug!("event=lesson_delete module=repo status=ok lesson_id={id}");
        Ok(())
    }
}
