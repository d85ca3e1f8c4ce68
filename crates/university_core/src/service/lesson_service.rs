//! Lesson use-case service.
//!
//! # Responsibility
//! - Create lessons from primitive form input.
//! - Expose the classroom, timeslot and course lookups needed to fill such a
//!   form.
//!
//! # Invariants
//! - A malformed date never reaches storage and is reported to the caller.

use crate::model::classroom::{Classroom, ClassroomId, NewClassroom};
use crate::model::course::{Course, CourseId};
use crate::model::lesson::{Lesson, LessonDetail, LessonId, NewLesson};
use crate::model::teacher::TeacherId;
use crate::model::timeslot::{NewTimeslot, Timeslot, TimeslotId};
use crate::repo::classroom_repo::ClassroomRepository;
use crate::repo::course_repo::CourseRepository;
use crate::repo::lesson_repo::LessonRepository;
use crate::repo::timeslot_repo::TimeslotRepository;
use crate::repo::{RepoError, RepoResult};
use log::{error, info};

/// Use-case service for lessons and the resources they reference.
pub struct LessonService<L, C, T, K>
where
    L: LessonRepository,
    C: ClassroomRepository,
    T: TimeslotRepository,
    K: CourseRepository,
{
    lessons: L,
    classrooms: C,
    timeslots: T,
    courses: K,
}

impl<L, C, T, K> LessonService<L, C, T, K>
where
    L: LessonRepository,
    C: ClassroomRepository,
    T: TimeslotRepository,
    K: CourseRepository,
{
    pub fn new(lessons: L, classrooms: C, timeslots: T, courses: K) -> Self {
        Self {
            lessons,
            classrooms,
            timeslots,
            courses,
        }
    }

    /// Creates a lesson from a `yyyy-MM-dd` date and three foreign ids.
    ///
    /// # Errors
    /// - `InvalidInput` when `date` does not parse; nothing is inserted.
    /// - `ConstraintViolation` when any id does not exist.
    pub fn create_lesson(
        &self,
        date: &str,
        timeslot_id: TimeslotId,
        classroom_id: ClassroomId,
        course_id: CourseId,
    ) -> RepoResult<LessonId> {
        info!(
            "event=lesson_create module=service status=start date={} timeslot_id={} classroom_id={} course_id={}",
            date, timeslot_id, classroom_id, course_id
        );

        let lesson = NewLesson::parse(date, timeslot_id, course_id, classroom_id).map_err(|err| {
            error!("event=lesson_create module=service status=error error_code=invalid_date error={err}");
            RepoError::from(err)
        })?;
        let id = self.lessons.add(&lesson)?;

        info!("event=lesson_create module=service status=ok lesson_id={id}");
        Ok(id)
    }

    pub fn get_lesson(&self, id: LessonId) -> RepoResult<LessonDetail> {
        self.lessons.get_by_id(id)
    }

    /// Full replace of the lesson row.
    pub fn update_lesson(&self, lesson: &Lesson) -> RepoResult<()> {
        self.lessons.update(lesson)
    }

    pub fn delete_lesson(&self, id: LessonId) -> RepoResult<()> {
        self.lessons.delete(id)
    }

    pub fn all_classrooms(&self) -> RepoResult<Vec<Classroom>> {
        info!("event=classroom_list module=service status=start");
        self.classrooms.get_all()
    }

    pub fn classroom(&self, id: ClassroomId) -> RepoResult<Classroom> {
        self.classrooms.get_by_id(id)
    }

    pub fn classroom_by_number(&self, number: &str) -> RepoResult<Classroom> {
        self.classrooms.get_by_number(number)
    }

    pub fn add_classroom(&self, classroom: &NewClassroom) -> RepoResult<ClassroomId> {
        self.classrooms.add(classroom)
    }

    pub fn update_classroom(&self, classroom: &Classroom) -> RepoResult<()> {
        self.classrooms.update(classroom)
    }

    pub fn delete_classroom(&self, id: ClassroomId) -> RepoResult<()> {
        self.classrooms.delete(id)
    }

    pub fn all_timeslots(&self) -> RepoResult<Vec<Timeslot>> {
        info!("event=timeslot_list module=service status=start");
        self.timeslots.get_all()
    }

    pub fn timeslot(&self, id: TimeslotId) -> RepoResult<Timeslot> {
        self.timeslots.get_by_id(id)
    }

    pub fn add_timeslot(&self, timeslot: &NewTimeslot) -> RepoResult<TimeslotId> {
        self.timeslots.add(timeslot)
    }

    pub fn update_timeslot(&self, timeslot: &Timeslot) -> RepoResult<()> {
        self.timeslots.update(timeslot)
    }

    pub fn delete_timeslot(&self, id: TimeslotId) -> RepoResult<()> {
        self.timeslots.delete(id)
    }

    /// Courses a teacher can schedule lessons for.
    pub fn courses_by_teacher(&self, teacher_id: TeacherId) -> RepoResult<Vec<Course>> {
        info!("event=course_list module=service status=start teacher_id={teacher_id}");
        self.courses.get_by_teacher(teacher_id)
    }
}
