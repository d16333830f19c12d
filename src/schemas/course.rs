use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Course;

/// Body of course create and update. Fields are optional at the serde level so
/// a missing field reports through validation like a blank one.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub(crate) struct CourseInput {
    #[serde(default, alias = "courseCode")]
    #[validate(
        required(message = "course_code is required"),
        custom(
            function = "crate::services::validation::not_blank",
            message = "course_code is required"
        ),
        length(max = 64, message = "course_code must be at most 64 characters")
    )]
    pub(crate) course_code: Option<String>,
    #[serde(default, alias = "courseName")]
    #[validate(
        required(message = "course_name is required"),
        custom(
            function = "crate::services::validation::not_blank",
            message = "course_name is required"
        ),
        length(max = 255, message = "course_name must be at most 255 characters")
    )]
    pub(crate) course_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255, message = "instructor must be at most 255 characters"))]
    pub(crate) instructor: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "term is required"),
        custom(function = "crate::services::validation::not_blank", message = "term is required"),
        length(max = 64, message = "term must be at most 64 characters")
    )]
    pub(crate) term: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseResponse {
    pub(crate) id: i64,
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) instructor: Option<String>,
    pub(crate) term: String,
    pub(crate) user_id: i64,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl CourseResponse {
    pub(crate) fn from_db(course: Course) -> Self {
        Self {
            id: course.id,
            course_code: course.course_code,
            course_name: course.course_name,
            instructor: course.instructor,
            term: course.term,
            user_id: course.user_id,
            created_at: format_primitive(course.created_at),
            updated_at: format_primitive(course.updated_at),
        }
    }
}
