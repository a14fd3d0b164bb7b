pub mod common;
pub mod course;
pub mod semester;
pub mod transcript;

pub use common::{format_gpa, format_points, Identifiable, NamedEntity};
pub use course::{Course, ScoreSource, MAX_CREDIT_HOURS};
pub use semester::{Semester, SemesterSummary};
pub use transcript::{PriorRecord, Transcript, TranscriptSummary};
