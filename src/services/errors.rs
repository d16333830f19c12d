use std::fmt;

use thiserror::Error;

use crate::db::types::InvalidExamStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entity {
    Course,
    Exam,
}

impl Entity {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Exam => "exam",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Course => f.write_str("Course"),
            Self::Exam => f.write_str("Exam"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ServiceError {
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: Entity, id: i64 },
    #[error("Unauthorized access to {}", entity.as_str())]
    Unauthorized { entity: Entity },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<InvalidExamStatus> for ServiceError {
    fn from(err: InvalidExamStatus) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{field}: {}", error.code),
                })
            })
            .collect();
        messages.sort();
        messages.dedup();

        Self::Validation(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(required(message = "name is required"))]
        name: Option<String>,
        #[validate(range(min = 0, message = "count must be non-negative"))]
        count: i32,
    }

    #[test]
    fn messages_are_stable() {
        assert_eq!(
            ServiceError::NotFound { entity: Entity::Course, id: 7 }.to_string(),
            "Course not found with id: 7"
        );
        assert_eq!(
            ServiceError::Unauthorized { entity: Entity::Exam }.to_string(),
            "Unauthorized access to exam"
        );
    }

    #[test]
    fn validation_errors_are_joined_sorted() {
        let errors = Sample { name: None, count: -1 }.validate().unwrap_err();
        let ServiceError::Validation(message) = ServiceError::from(errors) else {
            panic!("expected validation error");
        };
        assert_eq!(message, "count must be non-negative; name is required");
    }

    #[test]
    fn invalid_status_maps_to_validation() {
        let err = ServiceError::from(InvalidExamStatus("later".to_string()));
        assert!(matches!(err, ServiceError::Validation(message) if message.contains("'later'")));
    }
}
