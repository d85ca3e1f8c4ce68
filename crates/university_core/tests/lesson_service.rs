mod common;

use chrono::NaiveDate;
use common::{seed, setup, Campus};
use rusqlite::Connection;
use university_core::{
    Lesson, LessonService, NewClassroom, NewTimeslot, RepoError, SqliteClassroomRepository,
    SqliteCourseRepository, SqliteLessonRepository, SqliteTimeslotRepository, Timeslot,
    ValidationError,
};

type SqliteLessonService<'conn> = LessonService<
    SqliteLessonRepository<'conn>,
    SqliteClassroomRepository<'conn>,
    SqliteTimeslotRepository<'conn>,
    SqliteCourseRepository<'conn>,
>;

fn service(conn: &Connection) -> SqliteLessonService<'_> {
    LessonService::new(
        SqliteLessonRepository::try_new(conn).unwrap(),
        SqliteClassroomRepository::try_new(conn).unwrap(),
        SqliteTimeslotRepository::try_new(conn).unwrap(),
        SqliteCourseRepository::try_new(conn).unwrap(),
    )
}

fn lesson_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM lessons;", [], |row| row.get(0))
        .unwrap()
}

fn create_march_lesson(service: &SqliteLessonService<'_>, campus: &Campus) -> i64 {
    service
        .create_lesson("2024-03-10", campus.morning, campus.classroom, campus.course)
        .unwrap()
}

#[test]
fn create_lesson_persists_joined_detail() {
    let conn = setup();
    let campus = seed(&conn);
    let service = service(&conn);

    let id = create_march_lesson(&service, &campus);
    let detail = service.get_lesson(id).unwrap();

    assert_eq!(detail.date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    assert_eq!(detail.timeslot.description, "09:00-10:30");
    assert_eq!(detail.course.name, "Algebra");
    assert_eq!(detail.course.teacher_id, campus.teacher);
    assert_eq!(detail.classroom.number, "101");

    let stored: String = conn
        .query_row(
            "SELECT lesson_date FROM lessons WHERE lesson_id = ?1;",
            [id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, "2024-03-10");
}

#[test]
fn malformed_date_is_invalid_input_and_nothing_is_inserted() {
    let conn = setup();
    let campus = seed(&conn);
    let service = service(&conn);

    for raw in ["10.03.2024", "2024-02-30", "", "+10000-01-01"] {
        let err = service
            .create_lesson(raw, campus.morning, campus.classroom, campus.course)
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::InvalidInput(ValidationError::InvalidDate(_))
        ));
    }
    assert_eq!(lesson_count(&conn), 0);
}

#[test]
fn unknown_references_are_constraint_violations() {
    let conn = setup();
    let campus = seed(&conn);
    let service = service(&conn);

    let bad_classroom = service
        .create_lesson("2024-03-10", campus.morning, 999, campus.course)
        .unwrap_err();
    assert!(matches!(bad_classroom, RepoError::ConstraintViolation(_)));

    let bad_timeslot = service
        .create_lesson("2024-03-10", 999, campus.classroom, campus.course)
        .unwrap_err();
    assert!(matches!(bad_timeslot, RepoError::ConstraintViolation(_)));
    assert_eq!(lesson_count(&conn), 0);
}

#[test]
fn update_and_delete_lesson() {
    let conn = setup();
    let campus = seed(&conn);
    let service = service(&conn);
    let id = create_march_lesson(&service, &campus);

    let moved = Lesson {
        id,
        date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        timeslot_id: campus.noon,
        course_id: campus.other_course,
        classroom_id: campus.classroom,
    };
    service.update_lesson(&moved).unwrap();
    let detail = service.get_lesson(id).unwrap();
    assert_eq!(detail.to_lesson(), moved);
    assert_eq!(detail.timeslot.description, "10:40-12:10");

    service.delete_lesson(id).unwrap();
    assert!(service.get_lesson(id).unwrap_err().is_not_found());
    assert!(service.delete_lesson(id).unwrap_err().is_not_found());
}

#[test]
fn form_lookups_expose_classrooms_timeslots_and_courses() {
    let conn = setup();
    let campus = seed(&conn);
    let service = service(&conn);

    let annex = service.add_classroom(&NewClassroom::new("A-2", 12)).unwrap();
    let numbers: Vec<String> = service
        .all_classrooms()
        .unwrap()
        .into_iter()
        .map(|classroom| classroom.number)
        .collect();
    assert_eq!(numbers, vec!["101".to_string(), "A-2".to_string()]);
    assert_eq!(service.classroom_by_number("A-2").unwrap().id, annex);
    assert_eq!(service.classroom(campus.classroom).unwrap().capacity, 30);

    let slots = service.all_timeslots().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(service.timeslot(campus.noon).unwrap(), slots[1]);

    let courses = service.courses_by_teacher(campus.teacher).unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].name, "Algebra");
    assert!(service.courses_by_teacher(999).unwrap().is_empty());

    service.delete_classroom(annex).unwrap();
    assert!(service.classroom(annex).unwrap_err().is_not_found());
}

#[test]
fn timeslot_writes_keep_chronological_ids() {
    let conn = setup();
    let campus = seed(&conn);
    let service = service(&conn);

    let late = service
        .add_timeslot(&NewTimeslot::new("12:30-14:00"))
        .unwrap();
    assert!(late > campus.noon);

    let err = service
        .add_timeslot(&NewTimeslot::new("07:30-08:50"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidInput(ValidationError::TimeslotOutOfOrder { .. })
    ));

    let overtaking = Timeslot {
        id: campus.morning,
        description: "13:00-14:30".to_string(),
    };
    assert!(matches!(
        service.update_timeslot(&overtaking).unwrap_err(),
        RepoError::InvalidInput(ValidationError::TimeslotOutOfOrder { .. })
    ));

    let missing = Timeslot {
        id: 999,
        description: "20:00-21:00".to_string(),
    };
    assert!(service.update_timeslot(&missing).unwrap_err().is_not_found());
}

#[test]
fn timeslot_in_use_cannot_be_deleted() {
    let conn = setup();
    let campus = seed(&conn);
    let service = service(&conn);
    create_march_lesson(&service, &campus);

    let err = service.delete_timeslot(campus.morning).unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));
    service.delete_timeslot(campus.noon).unwrap();
}
