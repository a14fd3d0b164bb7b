use thiserror::Error;
use uuid::Uuid;

/// Entity families addressable by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Course,
    Semester,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Course => write!(f, "Course"),
            EntityKind::Semester => write!(f, "Semester"),
        }
    }
}

/// Error type for rejected transcript operations.
///
/// Every variant describes an operation that was refused before any state
/// changed; callers surface the message and let the user correct the input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GpaError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Score {0} is outside the 0-100 range")]
    OutOfRange(f64),
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },
}

impl GpaError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        GpaError::Validation(message.into())
    }

    pub(crate) fn course_not_found(id: Uuid) -> Self {
        GpaError::NotFound {
            kind: EntityKind::Course,
            id,
        }
    }

    pub(crate) fn semester_not_found(id: Uuid) -> Self {
        GpaError::NotFound {
            kind: EntityKind::Semester,
            id,
        }
    }
}

pub type Result<T> = std::result::Result<T, GpaError>;
