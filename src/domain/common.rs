use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Formats a GPA the way result panels show it: two decimals, or
/// `Undefined` when no graded hours exist.
pub fn format_gpa(gpa: Option<f64>) -> String {
    gpa.map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "Undefined".to_string())
}

/// Formats a points total with two decimals.
pub fn format_points(points: f64) -> String {
    format!("{points:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_gpa_is_spelled_out() {
        assert_eq!(format_gpa(None), "Undefined");
        assert_eq!(format_gpa(Some(2.957142857)), "2.96");
        assert_eq!(format_points(0.0), "0.00");
    }
}
