//! A single course entry and its score/grade edit contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::common::*,
    errors::{GpaError, Result},
    grades::{GradeLevel, GradeScale, MAX_SCORE, MIN_SCORE},
};

/// Largest credit-hour weight a course accepts.
pub const MAX_CREDIT_HOURS: u32 = 100_000;

/// Where the stored score came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Typed in by the user.
    #[default]
    Entered,
    /// Written by a direct grade selection.
    Derived,
}

/// One course inside a semester.
///
/// `grade` is always the letter of `score` under the course's grade scale;
/// the setters are the only way to change either, so the pair never drifts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "CourseRecord")]
pub struct Course {
    id: Uuid,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(default)]
    score_source: ScoreSource,
    #[serde(default)]
    credit_hours: u32,
    #[serde(default)]
    grade: GradeLevel,
    #[serde(skip)]
    scale: GradeScale,
}

/// Stored form of a [`Course`], checked before it becomes one.
#[derive(Deserialize)]
struct CourseRecord {
    id: Uuid,
    #[serde(default)]
    name: String,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    score_source: ScoreSource,
    #[serde(default)]
    credit_hours: u32,
    #[serde(default)]
    grade: Option<GradeLevel>,
}

impl TryFrom<CourseRecord> for Course {
    type Error = GpaError;

    fn try_from(record: CourseRecord) -> Result<Self> {
        let scale = GradeScale::default();
        let grade = match record.score {
            Some(score) => scale.grade_for_score(score)?,
            None => GradeLevel::Undefined,
        };
        if let Some(stored) = record.grade.filter(|stored| *stored != grade) {
            return Err(GpaError::validation(format!(
                "stored grade {stored} does not match score {:?}",
                record.score
            )));
        }
        if record.credit_hours > MAX_CREDIT_HOURS {
            return Err(GpaError::validation(format!(
                "credit hours cannot exceed {MAX_CREDIT_HOURS}, got {}",
                record.credit_hours
            )));
        }
        Ok(Self {
            id: record.id,
            name: record.name.trim().to_string(),
            score: record.score,
            score_source: record.score_source,
            credit_hours: record.credit_hours,
            grade,
            scale,
        })
    }
}

impl Default for Course {
    fn default() -> Self {
        Self::new()
    }
}

impl Course {
    /// Creates an empty course: no name, no score, zero hours, `Undefined` grade.
    pub fn new() -> Self {
        Self::with_scale(GradeScale::default())
    }

    pub fn with_scale(scale: GradeScale) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            score: None,
            score_source: ScoreSource::Entered,
            credit_hours: 0,
            grade: GradeLevel::Undefined,
            scale,
        }
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn score_source(&self) -> Option<ScoreSource> {
        self.score.map(|_| self.score_source)
    }

    pub fn credit_hours(&self) -> u32 {
        self.credit_hours
    }

    pub fn grade(&self) -> GradeLevel {
        self.grade
    }

    pub fn scale(&self) -> GradeScale {
        self.scale
    }

    pub fn is_graded(&self) -> bool {
        self.grade.is_defined()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into().trim().to_string();
    }

    /// Stores a typed score, or clears it with `None`, and re-derives the grade.
    pub fn set_score(&mut self, score: Option<f64>) -> Result<()> {
        let Some(value) = score else {
            self.score = None;
            self.score_source = ScoreSource::Entered;
            self.grade = GradeLevel::Undefined;
            tracing::debug!(course = %self.id, "course score cleared");
            return Ok(());
        };
        if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            tracing::debug!(course = %self.id, value, "rejected score");
            return Err(GpaError::validation(format!(
                "score must be between {MIN_SCORE} and {MAX_SCORE}, got {value}"
            )));
        }
        let grade = self.scale.grade_for_score(value)?;
        self.score = Some(value);
        self.score_source = ScoreSource::Entered;
        self.grade = grade;
        tracing::debug!(course = %self.id, value, grade = %grade, "course score updated");
        Ok(())
    }

    /// Text form of [`Course::set_score`]: blank input means "no score".
    pub fn set_score_input(&mut self, input: &str) -> Result<()> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return self.set_score(None);
        }
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| GpaError::validation(format!("`{trimmed}` is not a number")))?;
        self.set_score(Some(value))
    }

    /// Applies a grade picked directly by the user.
    ///
    /// Picking the letter the current score already earns leaves the score
    /// alone. `Undefined` only clears a score that an earlier grade pick
    /// wrote; a typed score keeps its grade.
    pub fn set_grade(&mut self, level: GradeLevel) {
        if !level.is_defined() {
            if self.score.is_some() && self.score_source == ScoreSource::Derived {
                self.score = None;
                self.score_source = ScoreSource::Entered;
                self.grade = GradeLevel::Undefined;
                tracing::debug!(course = %self.id, "derived score cleared");
            }
            return;
        }
        if self.score.is_some() && self.grade == level {
            return;
        }
        let Some(score) = self.scale.canonical_score_for_grade(level) else {
            return;
        };
        self.score = Some(score);
        self.score_source = ScoreSource::Derived;
        self.grade = level;
        tracing::debug!(course = %self.id, grade = %level, score, "course grade selected");
    }

    pub fn set_credit_hours(&mut self, hours: i64) -> Result<()> {
        if hours < 0 {
            return Err(GpaError::validation(format!(
                "credit hours cannot be negative, got {hours}"
            )));
        }
        let hours = u32::try_from(hours)
            .ok()
            .filter(|value| *value <= MAX_CREDIT_HOURS)
            .ok_or_else(|| {
                GpaError::validation(format!(
                    "credit hours cannot exceed {MAX_CREDIT_HOURS}, got {hours}"
                ))
            })?;
        self.credit_hours = hours;
        tracing::debug!(course = %self.id, hours, "course credit hours updated");
        Ok(())
    }

    /// Grade points earned: point value of the grade times credit hours.
    pub fn points(&self) -> f64 {
        self.scale.grade_point_value(self.grade) * f64::from(self.credit_hours)
    }

    /// Switches grade scale; the stored score is kept and the grade re-derived.
    pub(crate) fn rescale(&mut self, scale: GradeScale) {
        self.scale = scale;
        self.grade = self
            .score
            .and_then(|score| scale.grade_for_score(score).ok())
            .unwrap_or_default();
    }
}

impl Identifiable for Course {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Course {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::NamedEntity;
    use crate::grades::CanonicalScorePolicy;

    #[test]
    fn new_course_is_blank() {
        let course = Course::new();
        assert_eq!(course.name(), "");
        assert_eq!(course.score(), None);
        assert_eq!(course.credit_hours(), 0);
        assert_eq!(course.grade(), GradeLevel::Undefined);
        assert_eq!(course.points(), 0.0);
    }

    #[test]
    fn score_derives_grade_and_points() {
        let mut course = Course::new();
        course.set_score(Some(95.0)).unwrap();
        course.set_credit_hours(3).unwrap();
        assert_eq!(course.grade(), GradeLevel::APlus);
        assert_eq!(course.points(), 15.0);
    }

    #[test]
    fn zero_score_is_distinct_from_no_score() {
        let mut course = Course::new();
        course.set_score(Some(0.0)).unwrap();
        assert_eq!(course.grade(), GradeLevel::F);
        course.set_score(None).unwrap();
        assert_eq!(course.grade(), GradeLevel::Undefined);
    }

    #[test]
    fn invalid_score_leaves_course_untouched() {
        let mut course = Course::new();
        course.set_score(Some(72.0)).unwrap();
        let before = course.clone();
        let err = course.set_score(Some(100.5)).unwrap_err();
        assert!(matches!(err, GpaError::Validation(_)));
        assert!(course.set_score(Some(f64::INFINITY)).is_err());
        assert!(course.set_score(Some(-0.25)).is_err());
        assert_eq!(course, before);
    }

    #[test]
    fn score_text_input_treats_blank_as_cleared() {
        let mut course = Course::new();
        course.set_score_input("85").unwrap();
        assert_eq!(course.grade(), GradeLevel::BPlus);
        course.set_score_input("   ").unwrap();
        assert_eq!(course.score(), None);
        assert!(course.set_score_input("eighty").is_err());
        assert_eq!(course.score(), None);
    }

    #[test]
    fn grade_selection_writes_canonical_score() {
        let mut course = Course::new();
        course.set_grade(GradeLevel::B);
        assert_eq!(course.score(), Some(79.75));
        assert_eq!(course.score_source(), Some(ScoreSource::Derived));
        assert_eq!(course.grade(), GradeLevel::B);
    }

    #[test]
    fn grade_selection_matching_score_is_a_no_op() {
        let mut course = Course::new();
        course.set_score(Some(83.5)).unwrap();
        course.set_grade(GradeLevel::BPlus);
        assert_eq!(course.score(), Some(83.5));
        assert_eq!(course.score_source(), Some(ScoreSource::Entered));
    }

    #[test]
    fn repeated_grade_selection_is_idempotent() {
        let mut course = Course::with_scale(
            GradeScale::default().with_policy(CanonicalScorePolicy::Midpoint),
        );
        course.set_grade(GradeLevel::C);
        let first = course.score();
        course.set_grade(GradeLevel::C);
        assert_eq!(course.score(), first);
    }

    #[test]
    fn undefined_clears_only_derived_scores() {
        let mut derived = Course::new();
        derived.set_grade(GradeLevel::A);
        derived.set_grade(GradeLevel::Undefined);
        assert_eq!(derived.score(), None);
        assert_eq!(derived.grade(), GradeLevel::Undefined);

        let mut typed = Course::new();
        typed.set_score(Some(61.0)).unwrap();
        typed.set_grade(GradeLevel::Undefined);
        assert_eq!(typed.score(), Some(61.0));
        assert_eq!(typed.grade(), GradeLevel::C);

        let mut blank = Course::new();
        blank.set_grade(GradeLevel::Undefined);
        assert_eq!(blank.score(), None);
    }

    #[test]
    fn stored_courses_keep_grade_and_score_in_step() {
        let id = Uuid::new_v4();
        let restored: Course = serde_json::from_str(&format!(
            r#"{{"id":"{id}","name":"Optics","score":85.0,"credit_hours":3}}"#
        ))
        .unwrap();
        assert_eq!(restored.grade(), GradeLevel::BPlus);
        assert_eq!(restored.points(), 10.5);

        let mismatched = format!(r#"{{"id":"{id}","score":10.0,"credit_hours":3,"grade":"A+"}}"#);
        assert!(serde_json::from_str::<Course>(&mismatched).is_err());

        let out_of_range = format!(r#"{{"id":"{id}","score":150.0,"credit_hours":3,"grade":"A+"}}"#);
        assert!(serde_json::from_str::<Course>(&out_of_range).is_err());

        let ungraded_letter = format!(r#"{{"id":"{id}","grade":"B"}}"#);
        assert!(serde_json::from_str::<Course>(&ungraded_letter).is_err());
    }

    #[test]
    fn course_survives_a_json_round_trip() {
        let mut course = Course::new();
        course.set_name("Genetics");
        course.set_grade(GradeLevel::CPlus);
        course.set_credit_hours(2).unwrap();
        let json = serde_json::to_string(&course).unwrap();
        let restored: Course = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, course);
    }

    #[test]
    fn credit_hours_are_validated() {
        let mut course = Course::new();
        assert!(course.set_credit_hours(-1).is_err());
        assert!(course
            .set_credit_hours(i64::from(MAX_CREDIT_HOURS) + 1)
            .is_err());
        assert_eq!(course.credit_hours(), 0);
        course.set_credit_hours(4).unwrap();
        assert_eq!(course.credit_hours(), 4);
    }

    #[test]
    fn points_grow_with_credit_hours() {
        let mut course = Course::new();
        course.set_score(Some(67.0)).unwrap();
        let mut previous = course.points();
        for hours in 1..=12 {
            course.set_credit_hours(hours).unwrap();
            assert!(course.points() >= previous);
            previous = course.points();
        }
    }

    #[test]
    fn names_are_trimmed() {
        let mut course = Course::new();
        course.set_name("  Calculus I ");
        assert_eq!(course.name(), "Calculus I");
    }
}
