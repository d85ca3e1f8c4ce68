mod common;

use chrono::NaiveDate;
use common::{seed, setup, Campus};
use rusqlite::Connection;
use university_core::{
    DateInterval, LessonRepository, NewLesson, RepoError, SqliteLessonRepository,
    SqliteTimetableRepository, TimetableRepository, TimetableService, ValidationError,
};

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn schedule(conn: &Connection, day: &str, timeslot: i64, course: i64, classroom: i64) -> i64 {
    let lessons = SqliteLessonRepository::try_new(conn).unwrap();
    lessons
        .add(&NewLesson::parse(day, timeslot, course, classroom).unwrap())
        .unwrap()
}

fn lesson_ids(conn: &Connection, student: i64, start: &str, end: &str) -> Vec<i64> {
    let repo = SqliteTimetableRepository::try_new(conn).unwrap();
    let interval = DateInterval::new(date(start), date(end));
    repo.get_by_student(student, interval)
        .unwrap()
        .lessons
        .iter()
        .map(|lesson| lesson.id)
        .collect()
}

fn seed_with_lesson(conn: &Connection) -> (Campus, i64) {
    let campus = seed(conn);
    let lesson = schedule(
        conn,
        "2024-03-10",
        campus.morning,
        campus.course,
        campus.classroom,
    );
    (campus, lesson)
}

#[test]
fn student_timetable_for_march_contains_the_lesson() {
    let conn = setup();
    let (campus, lesson) = seed_with_lesson(&conn);
    let repo = SqliteTimetableRepository::try_new(&conn).unwrap();

    let march = DateInterval::new(date("2024-03-01"), date("2024-03-31"));
    let timetable = repo.get_by_student(campus.student, march).unwrap();

    assert_eq!(timetable.interval, march);
    assert_eq!(timetable.lessons.len(), 1);
    let entry = &timetable.lessons[0];
    assert_eq!(entry.id, lesson);
    assert_eq!(entry.date, date("2024-03-10"));
    assert_eq!(entry.timeslot.description, "09:00-10:30");
    assert_eq!(entry.course.name, "Algebra");
    assert_eq!(entry.classroom.number, "101");
}

#[test]
fn interval_without_lessons_is_empty() {
    let conn = setup();
    let (campus, _) = seed_with_lesson(&conn);

    assert!(lesson_ids(&conn, campus.student, "2024-04-01", "2024-04-30").is_empty());
}

#[test]
fn bounds_are_inclusive_and_reversed_interval_is_empty() {
    let conn = setup();
    let (campus, lesson) = seed_with_lesson(&conn);

    assert_eq!(
        lesson_ids(&conn, campus.student, "2024-03-10", "2024-03-10"),
        vec![lesson]
    );
    assert_eq!(
        lesson_ids(&conn, campus.student, "2024-03-01", "2024-03-10"),
        vec![lesson]
    );
    assert_eq!(
        lesson_ids(&conn, campus.student, "2024-03-10", "2024-03-31"),
        vec![lesson]
    );
    assert!(lesson_ids(&conn, campus.student, "2024-03-31", "2024-03-01").is_empty());
}

#[test]
fn student_sees_only_courses_of_own_group() {
    let conn = setup();
    let (campus, own) = seed_with_lesson(&conn);
    let foreign = schedule(
        &conn,
        "2024-03-10",
        campus.noon,
        campus.other_course,
        campus.classroom,
    );

    assert_eq!(
        lesson_ids(&conn, campus.student, "2024-03-01", "2024-03-31"),
        vec![own]
    );
    assert_eq!(
        lesson_ids(&conn, campus.other_student, "2024-03-01", "2024-03-31"),
        vec![foreign]
    );
    assert!(lesson_ids(&conn, 999, "2024-03-01", "2024-03-31").is_empty());
}

#[test]
fn teacher_sees_only_own_courses() {
    let conn = setup();
    let (campus, own) = seed_with_lesson(&conn);
    schedule(
        &conn,
        "2024-03-11",
        campus.morning,
        campus.other_course,
        campus.classroom,
    );
    let repo = SqliteTimetableRepository::try_new(&conn).unwrap();

    let march = DateInterval::new(date("2024-03-01"), date("2024-03-31"));
    let timetable = repo.get_by_teacher(campus.teacher, march).unwrap();
    let ids: Vec<i64> = timetable.lessons.iter().map(|lesson| lesson.id).collect();
    assert_eq!(ids, vec![own]);
    assert!(timetable
        .lessons
        .iter()
        .all(|lesson| lesson.course.id == campus.course));
}

#[test]
fn lessons_are_ordered_by_date_then_timeslot() {
    let conn = setup();
    let campus = seed(&conn);
    let late_day = schedule(
        &conn,
        "2024-03-12",
        campus.morning,
        campus.course,
        campus.classroom,
    );
    let noon = schedule(
        &conn,
        "2024-03-11",
        campus.noon,
        campus.course,
        campus.classroom,
    );
    let morning = schedule(
        &conn,
        "2024-03-11",
        campus.morning,
        campus.course,
        campus.classroom,
    );

    assert_eq!(
        lesson_ids(&conn, campus.student, "2024-03-01", "2024-03-31"),
        vec![morning, noon, late_day]
    );
}

#[test]
fn service_parses_bounds_and_rejects_malformed_dates() {
    let conn = setup();
    let (campus, lesson) = seed_with_lesson(&conn);
    let service = TimetableService::new(SqliteTimetableRepository::try_new(&conn).unwrap());

    let timetable = service
        .student_timetable(campus.student, "2024-03-01", "2024-03-31")
        .unwrap();
    assert_eq!(timetable.lessons[0].id, lesson);
    assert_eq!(
        timetable.to_string(),
        "2024-03-10 | 09:00-10:30 | Algebra | 101\n"
    );
    assert_eq!(timetable.lessons_on(date("2024-03-10")).count(), 1);

    let reversed = service
        .teacher_timetable(campus.teacher, "2024-03-31", "2024-03-01")
        .unwrap();
    assert!(reversed.is_empty());

    let err = service
        .teacher_timetable(campus.teacher, "2024-3-1x", "2024-03-31")
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidInput(ValidationError::InvalidDate(_))
    ));
}

#[test]
fn signed_year_bound_is_rejected_instead_of_hiding_lessons() {
    let conn = setup();
    let (campus, lesson) = seed_with_lesson(&conn);
    let service = TimetableService::new(SqliteTimetableRepository::try_new(&conn).unwrap());

    for end in ["+10000-01-01", "-0001-01-01"] {
        let err = service
            .student_timetable(campus.student, "2024-03-01", end)
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::InvalidInput(ValidationError::InvalidDate(_))
        ));
    }

    let far_end = service
        .student_timetable(campus.student, "2024-03-01", "9999-12-31")
        .unwrap();
    assert_eq!(far_end.lessons.len(), 1);
    assert_eq!(far_end.lessons[0].id, lesson);
}

#[test]
fn timetable_serializes_dates_as_iso_strings() {
    let conn = setup();
    let (campus, _) = seed_with_lesson(&conn);
    let repo = SqliteTimetableRepository::try_new(&conn).unwrap();

    let timetable = repo
        .get_by_student(campus.student, DateInterval::day(date("2024-03-10")))
        .unwrap();
    let json = serde_json::to_value(&timetable).unwrap();

    assert_eq!(json["interval"]["start"], "2024-03-10");
    assert_eq!(json["lessons"][0]["date"], "2024-03-10");
    assert_eq!(json["lessons"][0]["course"]["name"], "Algebra");
    assert_eq!(json["lessons"][0]["classroom"]["number"], "101");
}
