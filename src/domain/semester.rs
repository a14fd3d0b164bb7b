//! Ordered course container with semester-level aggregates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{common::*, course::Course},
    errors::{GpaError, Result},
    grades::GradeScale,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Semester {
    id: Uuid,
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(skip)]
    scale: GradeScale,
}

/// Aggregates of one semester, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SemesterSummary {
    pub total_hours: u32,
    pub total_points: f64,
    pub gpa: Option<f64>,
}

impl Default for Semester {
    fn default() -> Self {
        Self::new()
    }
}

impl Semester {
    pub fn new() -> Self {
        Self::with_scale(GradeScale::default())
    }

    pub fn with_scale(scale: GradeScale) -> Self {
        Self {
            id: Uuid::new_v4(),
            courses: Vec::new(),
            scale,
        }
    }

    /// Appends a blank course and hands it back for the caller to fill in.
    pub fn add_course(&mut self) -> &mut Course {
        let index = self.courses.len();
        self.courses.push(Course::with_scale(self.scale));
        let course = &mut self.courses[index];
        tracing::debug!(semester = %self.id, course = %course.id(), "course added");
        course
    }

    /// Removes a course; the remaining courses keep their relative order.
    pub fn remove_course(&mut self, id: Uuid) -> Result<Course> {
        let index = self
            .position_of(id)
            .ok_or_else(|| GpaError::course_not_found(id))?;
        let removed = self.courses.remove(index);
        tracing::debug!(semester = %self.id, course = %id, "course removed");
        Ok(removed)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, id: Uuid) -> Option<&Course> {
        self.courses.iter().find(|course| course.id() == id)
    }

    pub fn course_mut(&mut self, id: Uuid) -> Option<&mut Course> {
        self.courses.iter_mut().find(|course| course.id() == id)
    }

    pub fn course_at(&self, index: usize) -> Option<&Course> {
        self.courses.get(index)
    }

    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.courses.iter().position(|course| course.id() == id)
    }

    /// Display title for the course at `index`, numbered from one.
    pub fn course_title(index: usize) -> String {
        format!("Course {}", index + 1)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Credit hours of graded courses; ungraded courses carry no weight.
    pub fn total_hours(&self) -> u32 {
        self.courses
            .iter()
            .filter(|course| course.is_graded())
            .fold(0u32, |total, course| {
                total.saturating_add(course.credit_hours())
            })
    }

    pub fn total_points(&self) -> f64 {
        self.courses.iter().map(Course::points).sum()
    }

    /// `None` while no graded hours exist.
    pub fn gpa(&self) -> Option<f64> {
        let hours = self.total_hours();
        (hours > 0).then(|| self.total_points() / f64::from(hours))
    }

    pub fn summary(&self) -> SemesterSummary {
        SemesterSummary {
            total_hours: self.total_hours(),
            total_points: self.total_points(),
            gpa: self.gpa(),
        }
    }

    pub(crate) fn rescale(&mut self, scale: GradeScale) {
        self.scale = scale;
        for course in &mut self.courses {
            course.rescale(scale);
        }
    }
}

impl Identifiable for Semester {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::Identifiable;
    use crate::grades::GradeLevel;

    fn graded(semester: &mut Semester, score: f64, hours: i64) -> Uuid {
        let course = semester.add_course();
        course.set_score(Some(score)).unwrap();
        course.set_credit_hours(hours).unwrap();
        course.id()
    }

    #[test]
    fn empty_semester_has_undefined_gpa() {
        let semester = Semester::new();
        assert!(semester.is_empty());
        assert_eq!(semester.total_hours(), 0);
        assert_eq!(semester.total_points(), 0.0);
        assert_eq!(semester.gpa(), None);
    }

    #[test]
    fn ungraded_courses_do_not_count() {
        let mut semester = Semester::new();
        semester.add_course().set_credit_hours(3).unwrap();
        assert_eq!(semester.total_hours(), 0);
        assert_eq!(semester.gpa(), None);
    }

    #[test]
    fn aggregates_weighted_by_hours() {
        let mut semester = Semester::new();
        graded(&mut semester, 85.0, 3);
        graded(&mut semester, 55.0, 2);
        let summary = semester.summary();
        assert_eq!(summary.total_hours, 5);
        assert!((summary.total_points - 13.5).abs() < 1e-9);
        assert!((summary.gpa.unwrap() - 2.7).abs() < 1e-9);
    }

    #[test]
    fn graded_course_with_zero_hours_keeps_gpa_undefined() {
        let mut semester = Semester::new();
        graded(&mut semester, 91.0, 0);
        assert_eq!(semester.gpa(), None);
    }

    #[test]
    fn removal_preserves_order() {
        let mut semester = Semester::new();
        let first = graded(&mut semester, 95.0, 3);
        let second = graded(&mut semester, 75.0, 3);
        let third = graded(&mut semester, 45.0, 3);

        let removed = semester.remove_course(second).unwrap();
        assert_eq!(removed.grade(), GradeLevel::B);
        let ids: Vec<Uuid> = semester.courses().iter().map(Course::id).collect();
        assert_eq!(ids, vec![first, third]);
        assert_eq!(semester.position_of(third), Some(1));
        assert_eq!(Semester::course_title(1), "Course 2");
    }

    #[test]
    fn removing_unknown_course_fails() {
        let mut semester = Semester::new();
        graded(&mut semester, 60.0, 1);
        let missing = Uuid::new_v4();
        let err = semester.remove_course(missing).unwrap_err();
        assert_eq!(err, GpaError::course_not_found(missing));
        assert_eq!(semester.len(), 1);
    }
}
