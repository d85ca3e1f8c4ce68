//! Group/course assignment use-case service.

use crate::model::course::{Course, CourseId};
use crate::model::group::{GroupDetail, GroupId};
use crate::model::student::StudentId;
use crate::repo::course_repo::CourseRepository;
use crate::repo::group_repo::GroupRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service over groups and the courses assigned to them.
pub struct GroupService<G: GroupRepository, C: CourseRepository> {
    groups: G,
    courses: C,
}

impl<G: GroupRepository, C: CourseRepository> GroupService<G, C> {
    pub fn new(groups: G, courses: C) -> Self {
        Self { groups, courses }
    }

    pub fn group(&self, id: GroupId) -> RepoResult<GroupDetail> {
        self.groups.get_by_id(id)
    }

    pub fn group_of_student(&self, student_id: StudentId) -> RepoResult<GroupDetail> {
        self.groups.get_by_student(student_id)
    }

    /// Assigns a course to a group.
    ///
    /// Assigning an already assigned course is a `ConstraintViolation`.
    pub fn assign_course(&self, group_id: GroupId, course_id: CourseId) -> RepoResult<()> {
        info!(
            "event=group_assign_course module=service status=start group_id={} course_id={}",
            group_id, course_id
        );
        self.groups.assign_course(group_id, course_id)
    }

    pub fn remove_course(&self, group_id: GroupId, course_id: CourseId) -> RepoResult<()> {
        info!(
            "event=group_remove_course module=service status=start group_id={} course_id={}",
            group_id, course_id
        );
        self.groups.remove_course(group_id, course_id)
    }

    pub fn courses(&self, group_id: GroupId) -> RepoResult<Vec<Course>> {
        self.courses.get_by_group(group_id)
    }

    /// Courses the group could still be assigned.
    pub fn free_courses(&self, group_id: GroupId) -> RepoResult<Vec<Course>> {
        self.courses.get_free_courses(group_id)
    }
}
