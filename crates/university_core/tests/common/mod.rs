#![allow(dead_code)]

use rusqlite::Connection;
use university_core::db::open_db_in_memory;
use university_core::{
    ClassroomRepository, CourseRepository, FacultyRepository, GroupRepository, NewClassroom,
    NewCourse, NewFaculty, NewGroup, NewStudent, NewTeacher, NewTimeslot,
    SqliteClassroomRepository, SqliteCourseRepository, SqliteFacultyRepository,
    SqliteGroupRepository, SqliteStudentRepository, SqliteTeacherRepository,
    SqliteTimeslotRepository, StudentRepository, TeacherRepository, TimeslotRepository,
};

/// Ids of a small seeded university.
///
/// Group `group` is assigned `course` (taught by `teacher`); group
/// `other_group` is assigned `other_course` (taught by `other_teacher`).
pub struct Campus {
    pub faculty: i64,
    pub group: i64,
    pub other_group: i64,
    pub student: i64,
    pub other_student: i64,
    pub teacher: i64,
    pub other_teacher: i64,
    pub course: i64,
    pub other_course: i64,
    pub classroom: i64,
    pub morning: i64,
    pub noon: i64,
}

pub fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

pub fn seed(conn: &Connection) -> Campus {
    let faculties = SqliteFacultyRepository::try_new(conn).unwrap();
    let groups = SqliteGroupRepository::try_new(conn).unwrap();
    let students = SqliteStudentRepository::try_new(conn).unwrap();
    let teachers = SqliteTeacherRepository::try_new(conn).unwrap();
    let courses = SqliteCourseRepository::try_new(conn).unwrap();
    let classrooms = SqliteClassroomRepository::try_new(conn).unwrap();
    let timeslots = SqliteTimeslotRepository::try_new(conn).unwrap();

    let faculty = faculties
        .add(&NewFaculty::new("FMI", "Faculty of Mathematics and Informatics"))
        .unwrap();
    let group = groups.add(&NewGroup::new("MI-11", faculty)).unwrap();
    let other_group = groups.add(&NewGroup::new("MI-12", faculty)).unwrap();
    let student = students
        .add(&NewStudent::new("Ada", "Lovelace", group))
        .unwrap();
    let other_student = students
        .add(&NewStudent::new("Alan", "Turing", other_group))
        .unwrap();
    let teacher = teachers
        .add(&NewTeacher::new("Emmy", "Noether", faculty))
        .unwrap();
    let other_teacher = teachers
        .add(&NewTeacher::new("Kurt", "Godel", faculty))
        .unwrap();
    let course = courses
        .add(&NewCourse::new("Algebra", "Rings and fields", teacher))
        .unwrap();
    let other_course = courses
        .add(&NewCourse::new("Logic", "Incompleteness", other_teacher))
        .unwrap();
    groups.assign_course(group, course).unwrap();
    groups.assign_course(other_group, other_course).unwrap();
    let classroom = classrooms.add(&NewClassroom::new("101", 30)).unwrap();
    let morning = timeslots.add(&NewTimeslot::new("09:00-10:30")).unwrap();
    let noon = timeslots.add(&NewTimeslot::new("10:40-12:10")).unwrap();

    Campus {
        faculty,
        group,
        other_group,
        student,
        other_student,
        teacher,
        other_teacher,
        course,
        other_course,
        classroom,
        morning,
        noon,
    }
}
