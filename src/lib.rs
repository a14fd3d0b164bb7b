#![doc(test(attr(deny(warnings))))]

//! Moadaly Core computes grade point averages from semesters of courses.
//!
//! The [`domain`] module holds the transcript model (transcript, semesters,
//! courses); [`grades`] converts between scores, letters and grade points.
//! Hosts drive the model through plain method calls and re-read the
//! aggregates after every edit.
//!
//! ```
//! use moadaly_core::domain::Transcript;
//!
//! let mut transcript = Transcript::new();
//! let course = transcript.add_semester().add_course();
//! course.set_score(Some(95.0)).unwrap();
//! course.set_credit_hours(3).unwrap();
//! assert_eq!(transcript.recompute().overall_gpa, Some(5.0));
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod grades;
pub mod utils;

pub use errors::GpaError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Moadaly Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
