//! Timetable use-case service.
//!
//! # Invariants
//! - Interval bounds arrive as `yyyy-MM-dd` strings; a bound that does not
//!   parse is `InvalidInput`, a reversed interval is an empty timetable.

use crate::model::student::StudentId;
use crate::model::teacher::TeacherId;
use crate::model::timetable::{DateInterval, Timetable};
use crate::repo::timetable_repo::TimetableRepository;
use crate::repo::RepoResult;
use log::info;

pub struct TimetableService<R: TimetableRepository> {
    repo: R,
}

impl<R: TimetableRepository> TimetableService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn student_timetable(
        &self,
        student_id: StudentId,
        start: &str,
        end: &str,
    ) -> RepoResult<Timetable> {
        let interval = DateInterval::parse(start, end)?;
        info!(
            "event=timetable_student module=service status=start student_id={} start={} end={}",
            student_id, interval.start, interval.end
        );
        let timetable = self.repo.get_by_student(student_id, interval)?;
        info!(
            "event=timetable_student module=service status=ok student_id={} lessons={}",
            student_id,
            timetable.lessons.len()
        );
        Ok(timetable)
    }

    pub fn teacher_timetable(
        &self,
        teacher_id: TeacherId,
        start: &str,
        end: &str,
    ) -> RepoResult<Timetable> {
        let interval = DateInterval::parse(start, end)?;
        info!(
            "event=timetable_teacher module=service status=start teacher_id={} start={} end={}",
            teacher_id, interval.start, interval.end
        );
        let timetable = self.repo.get_by_teacher(teacher_id, interval)?;
        info!(
            "event=timetable_teacher module=service status=ok teacher_id={} lessons={}",
            teacher_id,
            timetable.lessons.len()
        );
        Ok(timetable)
    }
}
