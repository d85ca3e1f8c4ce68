//! Timetable read-model repository.
//!
//! # Responsibility
//! - Aggregate lessons for one student or one teacher over a date interval.
//! - Stay read-only; write paths live in the entity repositories.
//!
//! # Invariants
//! - Date filter is `BETWEEN start AND end`, inclusive on both ends.
//! - Results are ordered by `(lesson_date ASC, timeslot_id ASC)`.
//! - Entries carry only the joined columns: timeslot description, course
//!   name, classroom number.

use crate::model::classroom::ClassroomRef;
use crate::model::course::CourseRef;
use crate::model::lesson::ScheduledLesson;
use crate::model::student::StudentId;
use crate::model::teacher::TeacherId;
use crate::model::timeslot::Timeslot;
use crate::model::timetable::{DateInterval, Timetable};
use crate::repo::{ensure_connection_ready, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Row};

const SCHEDULED_LESSON_SELECT_SQL: &str = "SELECT
    lessons.lesson_id AS lesson_id,
    lessons.lesson_date AS lesson_date,
    lessons.timeslot_id AS timeslot_id,
    timeslots.timeslot_description AS timeslot_description,
    lessons.classroom_id AS classroom_id,
    classrooms.classroom_number AS classroom_number,
    lessons.course_id AS course_id,
    courses.course_name AS course_name
FROM lessons
JOIN timeslots ON lessons.timeslot_id = timeslots.timeslot_id
JOIN classrooms ON lessons.classroom_id = classrooms.classroom_id
JOIN courses ON lessons.course_id = courses.course_id";

/// Repository interface for timetable aggregation.
pub trait TimetableRepository {
    /// Lessons of the courses assigned to the student's group.
    ///
    /// An unknown student yields an empty timetable.
    fn get_by_student(
        &self,
        student_id: StudentId,
        interval: DateInterval,
    ) -> RepoResult<Timetable>;
    /// Lessons of the courses the teacher authors.
    fn get_by_teacher(
        &self,
        teacher_id: TeacherId,
        interval: DateInterval,
    ) -> RepoResult<Timetable>;
}

/// SQLite-backed timetable repository.
pub struct SqliteTimetableRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTimetableRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                "lessons",
                "timeslots",
                "classrooms",
                "courses",
                "students",
                "groups_courses",
            ],
        )?;
        Ok(Self { conn })
    }

    fn query_lessons(
        &self,
        filter: &str,
        subject_id: i64,
        interval: DateInterval,
    ) -> RepoResult<Vec<ScheduledLesson>> {
        let sql = format!(
            "{SCHEDULED_LESSON_SELECT_SQL}
             WHERE lessons.lesson_date BETWEEN ?1 AND ?2
               AND {filter}
             ORDER BY lessons.lesson_date ASC, lessons.timeslot_id ASC;"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let lessons = stmt
            .query_map(
                params![interval.start, interval.end, subject_id],
                map_scheduled_lesson,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(lessons)
    }
}

impl TimetableRepository for SqliteTimetableRepository<'_> {
    fn get_by_student(
        &self,
        student_id: StudentId,
        interval: DateInterval,
    ) -> RepoResult<Timetable> {
        debug!(
            "event=timetable_by_student module=repo status=start student_id={} start={} end={}",
            student_id, interval.start, interval.end
        );
        let lessons = self.query_lessons(
            "lessons.course_id IN (
                SELECT course_id FROM groups_courses WHERE group_id = (
                    SELECT group_id FROM students WHERE student_id = ?3
                )
            )",
            student_id,
            interval,
        )?;
        Ok(Timetable::new(interval, lessons))
    }

    fn get_by_teacher(
        &self,
        teacher_id: TeacherId,
        interval: DateInterval,
    ) -> RepoResult<Timetable> {
        debug!(
            "event=timetable_by_teacher module=repo status=start teacher_id={} start={} end={}",
            teacher_id, interval.start, interval.end
        );
        let lessons = self.query_lessons("courses.teacher_id = ?3", teacher_id, interval)?;
        Ok(Timetable::new(interval, lessons))
    }
}

fn map_scheduled_lesson(row: &Row<'_>) -> rusqlite::Result<ScheduledLesson> {
    Ok(ScheduledLesson {
        id: row.get("lesson_id")?,
        date: row.get("lesson_date")?,
        timeslot: Timeslot {
            id: row.get("timeslot_id")?,
            description: row.get("timeslot_description")?,
        },
        course: CourseRef {
            id: row.get("course_id")?,
            name: row.get("course_name")?,
        },
        classroom: ClassroomRef {
            id: row.get("classroom_id")?,
            number: row.get("classroom_number")?,
        },
    })
}
