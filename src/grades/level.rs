use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::GpaError;

/// Letter grade attached to a course, ordered worst to best.
///
/// `Undefined` is the state of a course before any score or grade is entered
/// and sorts below every real letter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum GradeLevel {
    #[default]
    Undefined,
    F,
    D,
    #[serde(rename = "D+")]
    DPlus,
    C,
    #[serde(rename = "C+")]
    CPlus,
    B,
    #[serde(rename = "B+")]
    BPlus,
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl GradeLevel {
    /// Every real letter, worst first.
    pub const GRADED: [GradeLevel; 9] = [
        GradeLevel::F,
        GradeLevel::D,
        GradeLevel::DPlus,
        GradeLevel::C,
        GradeLevel::CPlus,
        GradeLevel::B,
        GradeLevel::BPlus,
        GradeLevel::A,
        GradeLevel::APlus,
    ];

    /// Order in which a grade picker lists the choices.
    pub const MENU: [GradeLevel; 10] = [
        GradeLevel::Undefined,
        GradeLevel::APlus,
        GradeLevel::A,
        GradeLevel::BPlus,
        GradeLevel::B,
        GradeLevel::CPlus,
        GradeLevel::C,
        GradeLevel::DPlus,
        GradeLevel::D,
        GradeLevel::F,
    ];

    pub fn is_defined(self) -> bool {
        self != GradeLevel::Undefined
    }

    pub fn label(self) -> &'static str {
        match self {
            GradeLevel::Undefined => "Undefined",
            GradeLevel::F => "F",
            GradeLevel::D => "D",
            GradeLevel::DPlus => "D+",
            GradeLevel::C => "C",
            GradeLevel::CPlus => "C+",
            GradeLevel::B => "B",
            GradeLevel::BPlus => "B+",
            GradeLevel::A => "A",
            GradeLevel::APlus => "A+",
        }
    }

    /// Resolves a grade picker index into a level.
    pub fn from_menu_index(index: usize) -> Option<Self> {
        Self::MENU.get(index).copied()
    }

    pub fn menu_index(self) -> usize {
        Self::MENU
            .iter()
            .position(|level| *level == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GradeLevel {
    type Err = GpaError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_uppercase();
        let level = match normalized.as_str() {
            "" | "-" | "UNDEFINED" => GradeLevel::Undefined,
            "F" => GradeLevel::F,
            "D" => GradeLevel::D,
            "D+" => GradeLevel::DPlus,
            "C" => GradeLevel::C,
            "C+" => GradeLevel::CPlus,
            "B" => GradeLevel::B,
            "B+" => GradeLevel::BPlus,
            "A" => GradeLevel::A,
            "A+" => GradeLevel::APlus,
            _ => {
                return Err(GpaError::validation(format!(
                    "unknown grade `{}` (expected A+, A, B+, B, C+, C, D+, D, F or undefined)",
                    input.trim()
                )))
            }
        };
        Ok(level)
    }
}
