mod common;

use common::{seed, setup};
use university_core::{
    CourseRepository, GroupRepository, GroupService, LessonRepository, NewCourse, NewGroup,
    NewLesson, RepoError, SqliteCourseRepository, SqliteGroupRepository, SqliteLessonRepository,
};

#[test]
fn assigned_course_leaves_free_list_and_joins_group_list_once() {
    let conn = setup();
    let campus = seed(&conn);
    let service = GroupService::new(
        SqliteGroupRepository::try_new(&conn).unwrap(),
        SqliteCourseRepository::try_new(&conn).unwrap(),
    );

    let free_before: Vec<i64> = service
        .free_courses(campus.group)
        .unwrap()
        .iter()
        .map(|course| course.id)
        .collect();
    assert_eq!(free_before, vec![campus.other_course]);

    service
        .assign_course(campus.group, campus.other_course)
        .unwrap();

    assert!(service.free_courses(campus.group).unwrap().is_empty());
    let assigned: Vec<i64> = service
        .courses(campus.group)
        .unwrap()
        .iter()
        .map(|course| course.id)
        .collect();
    assert_eq!(assigned, vec![campus.course, campus.other_course]);
}

#[test]
fn assigning_twice_is_constraint_violation() {
    let conn = setup();
    let campus = seed(&conn);
    let groups = SqliteGroupRepository::try_new(&conn).unwrap();

    let err = groups.assign_course(campus.group, campus.course).unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));

    let courses = SqliteCourseRepository::try_new(&conn).unwrap();
    assert_eq!(courses.get_by_group(campus.group).unwrap().len(), 1);
}

#[test]
fn assigning_unknown_course_is_constraint_violation() {
    let conn = setup();
    let campus = seed(&conn);
    let groups = SqliteGroupRepository::try_new(&conn).unwrap();

    let err = groups.assign_course(campus.group, 999).unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));
}

#[test]
fn remove_course_detaches_and_reports_missing_pairs() {
    let conn = setup();
    let campus = seed(&conn);
    let service = GroupService::new(
        SqliteGroupRepository::try_new(&conn).unwrap(),
        SqliteCourseRepository::try_new(&conn).unwrap(),
    );

    service.remove_course(campus.group, campus.course).unwrap();
    assert!(service.courses(campus.group).unwrap().is_empty());
    assert_eq!(service.free_courses(campus.group).unwrap().len(), 2);

    let err = service
        .remove_course(campus.group, campus.course)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "group course",
            ..
        }
    ));
}

#[test]
fn group_detail_carries_faculty_courses_and_students() {
    let conn = setup();
    let campus = seed(&conn);
    let groups = SqliteGroupRepository::try_new(&conn).unwrap();

    let detail = groups.get_by_id(campus.group).unwrap();
    assert_eq!(detail.name, "MI-11");
    assert_eq!(detail.faculty.short_name, "FMI");
    assert_eq!(detail.courses.len(), 1);
    assert_eq!(detail.courses[0].name, "Algebra");
    assert_eq!(detail.students.len(), 1);
    assert_eq!(detail.students[0].id, campus.student);
    assert_eq!(detail.to_group().faculty_id, campus.faculty);

    let other_members = groups.get_students(campus.other_group).unwrap();
    assert_eq!(other_members[0].id, campus.other_student);
    assert_eq!(groups.get_by_faculty(campus.faculty).unwrap().len(), 2);
}

#[test]
fn group_of_student_resolves_through_membership() {
    let conn = setup();
    let campus = seed(&conn);
    let service = GroupService::new(
        SqliteGroupRepository::try_new(&conn).unwrap(),
        SqliteCourseRepository::try_new(&conn).unwrap(),
    );

    let detail = service.group_of_student(campus.other_student).unwrap();
    assert_eq!(detail.id, campus.other_group);
    assert_eq!(detail.name, "MI-12");

    let err = service.group_of_student(999).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "student", .. }));
}

#[test]
fn course_detail_lists_teacher_and_assigned_groups() {
    let conn = setup();
    let campus = seed(&conn);
    let groups = SqliteGroupRepository::try_new(&conn).unwrap();
    let courses = SqliteCourseRepository::try_new(&conn).unwrap();
    groups.assign_course(campus.other_group, campus.course).unwrap();

    let detail = courses.get_by_id(campus.course).unwrap();
    assert_eq!(detail.name, "Algebra");
    assert_eq!(detail.description, "Rings and fields");
    assert_eq!(detail.teacher.id, campus.teacher);
    assert_eq!(detail.teacher.last_name, "Noether");
    let group_ids: Vec<i64> = detail.groups.iter().map(|group| group.id).collect();
    assert_eq!(group_ids, vec![campus.group, campus.other_group]);

    let by_teacher = courses.get_by_teacher(campus.other_teacher).unwrap();
    assert_eq!(by_teacher.len(), 1);
    assert_eq!(by_teacher[0].id, campus.other_course);
}

#[test]
fn deleting_course_removes_its_assignments() {
    let conn = setup();
    let campus = seed(&conn);
    let courses = SqliteCourseRepository::try_new(&conn).unwrap();

    let elective = courses
        .add(&NewCourse::new("Topology", "", campus.teacher))
        .unwrap();
    let groups = SqliteGroupRepository::try_new(&conn).unwrap();
    groups.assign_course(campus.group, elective).unwrap();

    courses.delete(elective).unwrap();

    let remaining: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM groups_courses WHERE course_id = ?1;",
            [elective],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 0);
    assert_eq!(groups.get_by_id(campus.group).unwrap().courses.len(), 1);
}

#[test]
fn deleting_group_with_students_is_constraint_violation() {
    let conn = setup();
    let campus = seed(&conn);
    let groups = SqliteGroupRepository::try_new(&conn).unwrap();

    let err = groups.delete(campus.group).unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));

    let empty = groups.add(&NewGroup::new("MI-13", campus.faculty)).unwrap();
    groups.delete(empty).unwrap();
    assert!(groups.get_by_id(empty).unwrap_err().is_not_found());
}

#[test]
fn deleting_course_with_lessons_is_constraint_violation() {
    let conn = setup();
    let campus = seed(&conn);
    let lessons = SqliteLessonRepository::try_new(&conn).unwrap();
    let lesson =
        NewLesson::parse("2024-03-10", campus.morning, campus.course, campus.classroom).unwrap();
    lessons.add(&lesson).unwrap();

    let courses = SqliteCourseRepository::try_new(&conn).unwrap();
    let err = courses.delete(campus.course).unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));
}
