//! Top-level aggregation across semesters and an optional prior record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{common::*, semester::Semester},
    errors::{GpaError, Result},
    grades::{GradeLevel, GradeScale},
};

/// GPA and hours earned before the tracked semesters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorRecord {
    pub hours: u32,
    pub gpa: f64,
}

impl PriorRecord {
    pub fn points(&self) -> f64 {
        self.gpa * f64::from(self.hours)
    }
}

/// Overall results across the prior record and every semester.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TranscriptSummary {
    pub overall_gpa: Option<f64>,
    pub grand_total_hours: u32,
    pub grand_total_points: f64,
    pub overall_grade: GradeLevel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "TranscriptRecord")]
pub struct Transcript {
    #[serde(default)]
    semesters: Vec<Semester>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prior: Option<PriorRecord>,
    #[serde(default)]
    scale: GradeScale,
}

/// Stored form of a [`Transcript`]; restoring it re-applies the scale to every
/// semester and course and re-checks the prior record.
#[derive(Deserialize)]
struct TranscriptRecord {
    #[serde(default)]
    semesters: Vec<Semester>,
    #[serde(default)]
    prior: Option<PriorRecord>,
    #[serde(default)]
    scale: GradeScale,
}

impl TryFrom<TranscriptRecord> for Transcript {
    type Error = GpaError;

    fn try_from(record: TranscriptRecord) -> Result<Self> {
        let mut transcript = Transcript {
            semesters: record.semesters,
            prior: None,
            scale: record.scale,
        };
        transcript.set_scale(record.scale);
        if let Some(prior) = record.prior {
            let checked = transcript.validate_prior(i64::from(prior.hours), prior.gpa)?;
            transcript.prior = Some(checked);
        }
        Ok(transcript)
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(scale: GradeScale) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    pub fn scale(&self) -> GradeScale {
        self.scale
    }

    /// Switches the grade scale for every semester and course.
    ///
    /// Stored scores are kept as they are; only new grade selections use the
    /// new canonical-score policy.
    pub fn set_scale(&mut self, scale: GradeScale) {
        self.scale = scale;
        for semester in &mut self.semesters {
            semester.rescale(scale);
        }
        tracing::debug!(policy = %scale.policy, "transcript scale updated");
    }

    pub fn add_semester(&mut self) -> &mut Semester {
        let index = self.semesters.len();
        self.semesters.push(Semester::with_scale(self.scale));
        let semester = &mut self.semesters[index];
        tracing::debug!(semester = %semester.id(), "semester added");
        semester
    }

    pub fn remove_semester(&mut self, id: Uuid) -> Result<Semester> {
        let index = self
            .semesters
            .iter()
            .position(|semester| semester.id() == id)
            .ok_or_else(|| GpaError::semester_not_found(id))?;
        let removed = self.semesters.remove(index);
        tracing::debug!(semester = %id, courses = removed.len(), "semester removed");
        Ok(removed)
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn semester(&self, id: Uuid) -> Option<&Semester> {
        self.semesters.iter().find(|semester| semester.id() == id)
    }

    pub fn semester_mut(&mut self, id: Uuid) -> Option<&mut Semester> {
        self.semesters.iter_mut().find(|semester| semester.id() == id)
    }

    pub fn semester_at(&self, index: usize) -> Option<&Semester> {
        self.semesters.get(index)
    }

    /// Display title for the semester at `index`, numbered from one.
    pub fn semester_title(index: usize) -> String {
        format!("Semester {}", index + 1)
    }

    pub fn prior(&self) -> Option<PriorRecord> {
        self.prior
    }

    /// Sets or clears the prior record.
    ///
    /// Both values must be supplied together; passing neither clears it.
    pub fn set_prior(&mut self, hours: Option<i64>, gpa: Option<f64>) -> Result<()> {
        let record = match (hours, gpa) {
            (None, None) => None,
            (Some(_), None) => {
                return Err(GpaError::validation(
                    "prior hours require a prior GPA".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(GpaError::validation(
                    "prior GPA requires prior hours".to_string(),
                ))
            }
            (Some(hours), Some(gpa)) => Some(self.validate_prior(hours, gpa)?),
        };
        self.prior = record;
        tracing::debug!(?record, "prior record updated");
        Ok(())
    }

    fn validate_prior(&self, hours: i64, gpa: f64) -> Result<PriorRecord> {
        let hours = u32::try_from(hours).map_err(|_| {
            GpaError::validation(format!("prior hours must be a non-negative integer, got {hours}"))
        })?;
        let max = self.scale.max_gpa();
        if !gpa.is_finite() || gpa < 0.0 || gpa > max {
            return Err(GpaError::validation(format!(
                "prior GPA must be between 0 and {max}, got {gpa}"
            )));
        }
        Ok(PriorRecord { hours, gpa })
    }

    /// Recomputes the overall results from the current state.
    pub fn recompute(&self) -> TranscriptSummary {
        let (prior_hours, prior_points) = self
            .prior
            .map(|record| (record.hours, record.points()))
            .unwrap_or((0, 0.0));
        let grand_total_hours = self
            .semesters
            .iter()
            .fold(prior_hours, |total, semester| {
                total.saturating_add(semester.total_hours())
            });
        let grand_total_points = prior_points
            + self
                .semesters
                .iter()
                .map(Semester::total_points)
                .sum::<f64>();
        let overall_gpa =
            (grand_total_hours > 0).then(|| grand_total_points / f64::from(grand_total_hours));
        TranscriptSummary {
            overall_gpa,
            grand_total_hours,
            grand_total_points,
            overall_grade: self.scale.grade_for_gpa(overall_gpa),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::Identifiable;
    use crate::grades::CanonicalScorePolicy;

    fn transcript_with_semester() -> Transcript {
        let mut transcript = Transcript::new();
        let semester = transcript.add_semester();
        for (score, hours) in [(85.0, 3), (55.0, 2)] {
            let course = semester.add_course();
            course.set_score(Some(score)).unwrap();
            course.set_credit_hours(hours).unwrap();
        }
        transcript
    }

    #[test]
    fn empty_transcript_is_undefined() {
        let summary = Transcript::new().recompute();
        assert_eq!(summary.grand_total_hours, 0);
        assert_eq!(summary.grand_total_points, 0.0);
        assert_eq!(summary.overall_gpa, None);
        assert_eq!(summary.overall_grade, GradeLevel::Undefined);
    }

    #[test]
    fn prior_record_blends_into_overall_gpa() {
        let mut transcript = transcript_with_semester();
        transcript.set_prior(Some(30), Some(3.0)).unwrap();
        let summary = transcript.recompute();
        assert_eq!(summary.grand_total_hours, 35);
        assert!((summary.grand_total_points - 103.5).abs() < 1e-9);
        assert!((summary.overall_gpa.unwrap() - 2.957142857).abs() < 1e-9);
        assert_eq!(summary.overall_grade, GradeLevel::B);
    }

    #[test]
    fn prior_only_transcript_has_a_gpa() {
        let mut transcript = Transcript::new();
        transcript.set_prior(Some(12), Some(4.2)).unwrap();
        let summary = transcript.recompute();
        assert_eq!(summary.grand_total_hours, 12);
        assert!((summary.overall_gpa.unwrap() - 4.2).abs() < 1e-9);
    }

    #[test]
    fn half_a_prior_record_is_rejected() {
        let mut transcript = Transcript::new();
        transcript.set_prior(Some(20), Some(2.5)).unwrap();
        assert!(matches!(
            transcript.set_prior(Some(10), None),
            Err(GpaError::Validation(_))
        ));
        assert!(matches!(
            transcript.set_prior(None, Some(3.0)),
            Err(GpaError::Validation(_))
        ));
        assert_eq!(
            transcript.prior(),
            Some(PriorRecord {
                hours: 20,
                gpa: 2.5
            })
        );
    }

    #[test]
    fn out_of_range_prior_values_are_rejected() {
        let mut transcript = Transcript::new();
        assert!(transcript.set_prior(Some(-3), Some(3.0)).is_err());
        assert!(transcript.set_prior(Some(3), Some(-0.1)).is_err());
        assert!(transcript.set_prior(Some(3), Some(5.5)).is_err());
        assert!(transcript.set_prior(Some(3), Some(f64::NAN)).is_err());
        assert_eq!(transcript.prior(), None);
    }

    #[test]
    fn prior_can_be_cleared() {
        let mut transcript = Transcript::new();
        transcript.set_prior(Some(9), Some(1.0)).unwrap();
        transcript.set_prior(None, None).unwrap();
        assert_eq!(transcript.prior(), None);
    }

    #[test]
    fn semesters_are_addressed_by_id() {
        let mut transcript = Transcript::new();
        let first = transcript.add_semester().id();
        let second = transcript.add_semester().id();
        let third = transcript.add_semester().id();
        transcript.remove_semester(second).unwrap();
        let ids: Vec<Uuid> = transcript.semesters().iter().map(Semester::id).collect();
        assert_eq!(ids, vec![first, third]);
        assert!(transcript.semester(second).is_none());
        assert_eq!(
            transcript.remove_semester(second),
            Err(GpaError::semester_not_found(second))
        );
        assert_eq!(Transcript::semester_title(1), "Semester 2");
    }

    #[test]
    fn scale_changes_reach_existing_courses() {
        let mut transcript = Transcript::new();
        let semester_id = transcript.add_semester().id();
        transcript.set_scale(GradeScale::default().with_policy(CanonicalScorePolicy::LowerBound));
        let semester = transcript.semester_mut(semester_id).unwrap();
        let course = semester.add_course();
        course.set_grade(GradeLevel::A);
        assert_eq!(course.score(), Some(90.0));
    }

    #[test]
    fn serializes_as_plain_record() {
        let transcript = transcript_with_semester();
        let json = serde_json::to_string(&transcript).unwrap();
        assert!(json.contains("\"B+\""));
        let restored: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.recompute(), transcript.recompute());
    }

    #[test]
    fn restored_transcript_keeps_its_policy_everywhere() {
        let scale = GradeScale::default().with_policy(CanonicalScorePolicy::LowerBound);
        let mut transcript = Transcript::with_scale(scale);
        let semester_id = transcript.add_semester().id();
        let json = serde_json::to_string(&transcript).unwrap();

        let mut restored: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.scale().policy, CanonicalScorePolicy::LowerBound);
        let course = restored.semester_mut(semester_id).unwrap().add_course();
        assert_eq!(course.scale().policy, CanonicalScorePolicy::LowerBound);
        course.set_grade(GradeLevel::A);
        assert_eq!(course.score(), Some(90.0));
    }

    #[test]
    fn restored_prior_record_is_checked() {
        let json = r#"{"semesters":[],"prior":{"hours":30,"gpa":7.5}}"#;
        assert!(serde_json::from_str::<Transcript>(json).is_err());
        let json = r#"{"semesters":[],"prior":{"hours":30,"gpa":3.0}}"#;
        let restored: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(restored.prior(), Some(PriorRecord { hours: 30, gpa: 3.0 }));
    }
}
