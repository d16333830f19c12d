use sqlx::FromRow;
use time::{Date, PrimitiveDateTime, Time};

use crate::db::types::ExamStatus;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub(crate) struct Course {
    pub(crate) id: i64,
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) instructor: Option<String>,
    pub(crate) term: String,
    pub(crate) user_id: i64,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

/// An exam row joined with the owning course. `owner_id` is the course's
/// `user_id`; exams carry no owner of their own.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub(crate) struct ExamWithCourse {
    pub(crate) id: i64,
    pub(crate) course_id: i64,
    pub(crate) exam_type: String,
    pub(crate) exam_date: Date,
    pub(crate) exam_time: Time,
    pub(crate) location: Option<String>,
    pub(crate) duration: Option<f64>,
    pub(crate) status: ExamStatus,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) owner_id: i64,
}
