//! Text layouts for the transcript panels.

use crate::{
    config::Config,
    domain::{
        format_gpa, format_points, Course, NamedEntity, PriorRecord, Semester, Transcript,
        TranscriptSummary,
    },
};

const UNAVAILABLE: &str = "[unavailable]";

pub fn result_lines(summary: &TranscriptSummary) -> Vec<String> {
    vec![
        format!("  GPA:    {}", format_gpa(summary.overall_gpa)),
        format!("  Hours:  {}", summary.grand_total_hours),
        format!("  Points: {}", format_points(summary.grand_total_points)),
        format!("  Grade:  {}", summary.overall_grade),
    ]
}

pub fn prior_lines(prior: Option<PriorRecord>) -> Vec<String> {
    match prior {
        Some(record) => vec![
            format!("  Previous hours: {}", record.hours),
            format!("  Previous GPA:   {:.2}", record.gpa),
        ],
        None => vec!["  No previous GPA recorded.".to_string()],
    }
}

pub fn system_lines(config: &Config) -> Vec<String> {
    vec![
        format!(
            "  Point scale:    (*) {}   ( ) 4.000 {UNAVAILABLE}",
            config.point_scale
        ),
        format!(
            "  Grading system: (*) {}   ( ) curve {UNAVAILABLE}",
            config.grading_system
        ),
        format!("  Score policy:   {}", config.score_policy),
    ]
}

fn course_row(index: usize, course: &Course) -> String {
    let score = course
        .score()
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "  {:<10} {:<24} {:>7} {:>6}  {:<9} {:>8}",
        format!("{}:", Semester::course_title(index)),
        course.name(),
        score,
        course.credit_hours(),
        course.grade().to_string(),
        format_points(course.points()),
    )
}

pub fn semester_lines(semester: &Semester) -> Vec<String> {
    let mut lines = vec![format!(
        "  {:<10} {:<24} {:>7} {:>6}  {:<9} {:>8}",
        "Title", "Course Name", "Score", "Hours", "Grade", "Points"
    )];
    if semester.is_empty() {
        lines.push("  (no courses)".to_string());
    }
    lines.extend(
        semester
            .courses()
            .iter()
            .enumerate()
            .map(|(index, course)| course_row(index, course)),
    );
    let summary = semester.summary();
    lines.push(format!(
        "  Total: {} hours, {} points, GPA {}",
        summary.total_hours,
        format_points(summary.total_points),
        format_gpa(summary.gpa)
    ));
    lines
}

/// Every semester under its display title.
pub fn transcript_sections(transcript: &Transcript) -> Vec<(String, Vec<String>)> {
    transcript
        .semesters()
        .iter()
        .enumerate()
        .map(|(index, semester)| (Transcript::semester_title(index), semester_lines(semester)))
        .collect()
}
