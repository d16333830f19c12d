use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, Time};
use validator::Validate;

use crate::core::time::{
    format_date, format_primitive, format_time, parse_date, parse_time_flexible,
};
use crate::db::models::ExamWithCourse;
use crate::db::types::ExamStatus;

/// Body of exam create and update. `status` stays a string here and is parsed
/// by the service so an unknown value is a validation failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub(crate) struct ExamInput {
    #[serde(default, alias = "courseId")]
    pub(crate) course_id: Option<i64>,
    #[serde(default, alias = "examType")]
    #[validate(
        required(message = "exam_type is required"),
        custom(
            function = "crate::services::validation::not_blank",
            message = "exam_type is required"
        ),
        length(max = 128, message = "exam_type must be at most 128 characters")
    )]
    pub(crate) exam_type: Option<String>,
    #[serde(default, alias = "examDate", deserialize_with = "deserialize_option_date")]
    #[validate(required(message = "exam_date is required"))]
    pub(crate) exam_date: Option<Date>,
    #[serde(default, alias = "examTime", deserialize_with = "deserialize_option_time")]
    #[validate(required(message = "exam_time is required"))]
    pub(crate) exam_time: Option<Time>,
    #[serde(default)]
    #[validate(length(max = 255, message = "location must be at most 255 characters"))]
    pub(crate) location: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "duration must be non-negative"))]
    pub(crate) duration: Option<f64>,
    #[serde(default)]
    pub(crate) status: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExamResponse {
    pub(crate) id: i64,
    pub(crate) course_id: i64,
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) exam_type: String,
    pub(crate) exam_date: String,
    pub(crate) exam_time: String,
    pub(crate) location: Option<String>,
    pub(crate) duration: Option<f64>,
    pub(crate) status: ExamStatus,
    pub(crate) created_at: String,
}

impl ExamResponse {
    pub(crate) fn from_db(exam: ExamWithCourse) -> Self {
        Self {
            id: exam.id,
            course_id: exam.course_id,
            course_code: exam.course_code,
            course_name: exam.course_name,
            exam_type: exam.exam_type,
            exam_date: format_date(exam.exam_date),
            exam_time: format_time(exam.exam_time),
            location: exam.location,
            duration: exam.duration,
            status: exam.status,
            created_at: format_primitive(exam.created_at),
        }
    }
}

fn deserialize_option_date<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_date(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
            .map(Some),
        None => Ok(None),
    }
}

fn deserialize_option_time<'de, D>(deserializer: D) -> Result<Option<Time>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_time_flexible(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time: {raw}")))
            .map(Some),
        None => Ok(None),
    }
}
