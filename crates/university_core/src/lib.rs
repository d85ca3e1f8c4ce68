//! Data-access core for university administration.
//! Entity repositories, the timetable read model and the services on top.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig, DatabaseConfig, LoggingConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::classroom::{Classroom, ClassroomId, ClassroomRef, NewClassroom};
pub use model::course::{Course, CourseDetail, CourseId, CourseRef, NewCourse};
pub use model::faculty::{Faculty, FacultyId, NewFaculty};
pub use model::group::{Group, GroupDetail, GroupId, GroupRef, NewGroup};
pub use model::lesson::{Lesson, LessonDetail, LessonId, NewLesson, ScheduledLesson};
pub use model::student::{NewStudent, Student, StudentDetail, StudentId};
pub use model::teacher::{NewTeacher, Teacher, TeacherDetail, TeacherId, TeacherRef};
pub use model::timeslot::{NewTimeslot, Timeslot, TimeslotId};
pub use model::timetable::{DateInterval, Timetable};
pub use model::validation::{parse_date, ValidationError};
pub use repo::classroom_repo::{ClassroomRepository, SqliteClassroomRepository};
pub use repo::course_repo::{CourseRepository, SqliteCourseRepository};
pub use repo::faculty_repo::{FacultyRepository, SqliteFacultyRepository};
pub use repo::group_repo::{GroupRepository, SqliteGroupRepository};
pub use repo::lesson_repo::{LessonRepository, SqliteLessonRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::teacher_repo::{SqliteTeacherRepository, TeacherRepository};
pub use repo::timeslot_repo::{SqliteTimeslotRepository, TimeslotRepository};
pub use repo::timetable_repo::{SqliteTimetableRepository, TimetableRepository};
pub use repo::{RepoError, RepoResult};
pub use service::group_service::GroupService;
pub use service::lesson_service::LessonService;
pub use service::timetable_service::TimetableService;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
