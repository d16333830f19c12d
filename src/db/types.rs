use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

/// Lifecycle of an exam. Either state may be set from the other at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "examstatus", rename_all = "UPPERCASE")]
pub(crate) enum ExamStatus {
    #[default]
    Upcoming,
    Completed,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid exam status '{0}', expected one of: upcoming, completed")]
pub(crate) struct InvalidExamStatus(pub(crate) String);

impl ExamStatus {
    /// Case-insensitive match against the enumeration names.
    pub(crate) fn parse(raw: &str) -> Result<Self, InvalidExamStatus> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "UPCOMING" => Ok(Self::Upcoming),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(InvalidExamStatus(raw.to_string())),
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
