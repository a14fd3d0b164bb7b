use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{GpaError, Result};

use super::level::GradeLevel;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;
/// Smallest increment a score is entered with.
pub const SCORE_STEP: f64 = 0.25;

/// One row of a grading table: the lowest score earning `level` and the
/// grade-point value it carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRow {
    pub level: GradeLevel,
    pub min_score: f64,
    pub points: f64,
}

const fn row(level: GradeLevel, min_score: f64, points: f64) -> ScaleRow {
    ScaleRow {
        level,
        min_score,
        points,
    }
}

// Rows are sorted by `min_score`; each level owns `[min_score, next.min_score)`
// and the last row is closed at MAX_SCORE.
const FIVE_POINT_TABLE: [ScaleRow; 9] = [
    row(GradeLevel::F, 0.0, 0.0),
    row(GradeLevel::D, 50.0, 1.0),
    row(GradeLevel::DPlus, 55.0, 1.5),
    row(GradeLevel::C, 60.0, 2.0),
    row(GradeLevel::CPlus, 65.0, 2.5),
    row(GradeLevel::B, 70.0, 3.0),
    row(GradeLevel::BPlus, 80.0, 3.5),
    row(GradeLevel::A, 90.0, 4.0),
    row(GradeLevel::APlus, 95.0, 5.0),
];

/// Point scale the grade-point values are expressed on.
///
/// Only the 5.000 scale has a table; the 4.000 scale is rejected by the
/// configuration layer until its grade-point values are defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointScale {
    #[default]
    #[serde(rename = "5.000")]
    FivePoint,
}

impl PointScale {
    fn table(self) -> &'static [ScaleRow] {
        match self {
            PointScale::FivePoint => &FIVE_POINT_TABLE,
        }
    }
}

impl fmt::Display for PointScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointScale::FivePoint => f.write_str("5.000"),
        }
    }
}

/// Representative score written into a course when a grade is picked directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalScorePolicy {
    /// Highest score that still earns the letter.
    #[default]
    UpperBound,
    Midpoint,
    LowerBound,
}

impl fmt::Display for CanonicalScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CanonicalScorePolicy::UpperBound => "upper_bound",
            CanonicalScorePolicy::Midpoint => "midpoint",
            CanonicalScorePolicy::LowerBound => "lower_bound",
        };
        f.write_str(label)
    }
}

impl FromStr for CanonicalScorePolicy {
    type Err = GpaError;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "upper_bound" | "upper" => Ok(CanonicalScorePolicy::UpperBound),
            "midpoint" | "mid" => Ok(CanonicalScorePolicy::Midpoint),
            "lower_bound" | "lower" => Ok(CanonicalScorePolicy::LowerBound),
            other => Err(GpaError::validation(format!(
                "unknown score policy `{other}` (expected upper_bound, midpoint or lower_bound)"
            ))),
        }
    }
}

/// Score range of a letter: `[min, end)`, or `[min, end]` for the top letter.
///
/// Consecutive intervals share their boundary, so together they cover every
/// real score in `[MIN_SCORE, MAX_SCORE]` exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInterval {
    pub min: f64,
    pub end: f64,
    pub closed: bool,
}

impl ScoreInterval {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && (score < self.end || (self.closed && score <= self.end))
    }

    /// Highest score inside the interval at `SCORE_STEP` resolution.
    pub fn highest_score(&self) -> f64 {
        if self.closed {
            self.end
        } else {
            self.end - SCORE_STEP
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.highest_score()) / 2.0
    }
}

/// Converts between scores, letters and grade points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeScale {
    pub point_scale: PointScale,
    pub policy: CanonicalScorePolicy,
}

impl GradeScale {
    pub fn new(point_scale: PointScale, policy: CanonicalScorePolicy) -> Self {
        Self {
            point_scale,
            policy,
        }
    }

    pub fn with_policy(mut self, policy: CanonicalScorePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn rows(&self) -> &'static [ScaleRow] {
        self.point_scale.table()
    }

    fn row_index(&self, level: GradeLevel) -> Option<usize> {
        self.rows().iter().position(|row| row.level == level)
    }

    /// Returns the letter whose interval contains `score`.
    pub fn grade_for_score(&self, score: f64) -> Result<GradeLevel> {
        if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(GpaError::OutOfRange(score));
        }
        self.rows()
            .iter()
            .rev()
            .find(|row| score >= row.min_score)
            .map(|row| row.level)
            .ok_or(GpaError::OutOfRange(score))
    }

    pub fn interval(&self, level: GradeLevel) -> Option<ScoreInterval> {
        let rows = self.rows();
        let index = self.row_index(level)?;
        let (end, closed) = rows
            .get(index + 1)
            .map(|next| (next.min_score, false))
            .unwrap_or((MAX_SCORE, true));
        Some(ScoreInterval {
            min: rows[index].min_score,
            end,
            closed,
        })
    }

    /// Score written into a course when `level` is selected directly.
    /// `None` for `Undefined`.
    pub fn canonical_score_for_grade(&self, level: GradeLevel) -> Option<f64> {
        let interval = self.interval(level)?;
        Some(match self.policy {
            CanonicalScorePolicy::UpperBound => interval.highest_score(),
            CanonicalScorePolicy::Midpoint => interval.midpoint(),
            CanonicalScorePolicy::LowerBound => interval.min,
        })
    }

    pub fn grade_point_value(&self, level: GradeLevel) -> f64 {
        self.row_index(level)
            .map(|index| self.rows()[index].points)
            .unwrap_or(0.0)
    }

    pub fn max_gpa(&self) -> f64 {
        self.rows().last().map(|row| row.points).unwrap_or(0.0)
    }

    /// Maps a blended GPA back onto the letter scale.
    ///
    /// The GPA earns the letter whose point value is nearest; thresholds sit
    /// at the midpoints between consecutive point values and a GPA exactly on
    /// a threshold takes the higher letter.
    pub fn grade_for_gpa(&self, gpa: Option<f64>) -> GradeLevel {
        let Some(gpa) = gpa.filter(|value| value.is_finite()) else {
            return GradeLevel::Undefined;
        };
        let rows = self.rows();
        let mut level = rows.first().map(|row| row.level).unwrap_or_default();
        for pair in rows.windows(2) {
            let threshold = (pair[0].points + pair[1].points) / 2.0;
            if gpa >= threshold {
                level = pair[1].level;
            }
        }
        level
    }
}
