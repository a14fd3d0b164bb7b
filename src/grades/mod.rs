//! Score, letter and grade-point conversions.

pub mod level;
pub mod scale;

pub use level::GradeLevel;
pub use scale::{
    CanonicalScorePolicy, GradeScale, PointScale, ScaleRow, ScoreInterval, MAX_SCORE, MIN_SCORE,
    SCORE_STEP,
};
