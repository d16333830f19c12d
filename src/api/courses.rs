use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::guards::CallerId;
use crate::core::state::AppState;
use crate::schemas::course::{CourseInput, CourseResponse};
use crate::schemas::exam::ExamResponse;
use crate::services;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/search", get(search_courses))
        .route("/:course_id", get(get_course).put(update_course).delete(delete_course))
        .route("/:course_id/exams", get(list_course_exams))
}

#[derive(Debug, Deserialize)]
struct ListCoursesQuery {
    #[serde(default)]
    term: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    code: String,
}

#[derive(Debug, Deserialize)]
struct DeleteCourseQuery {
    #[serde(default)]
    force: bool,
}

async fn list_courses(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Query(params): Query<ListCoursesQuery>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = match params.term.as_deref().filter(|term| !term.is_empty()) {
        Some(term) => services::courses::list_by_user_and_term(state.db(), user_id, term).await?,
        None => services::courses::list_by_user(state.db(), user_id).await?,
    };

    Ok(Json(courses.into_iter().map(CourseResponse::from_db).collect()))
}

async fn search_courses(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = services::courses::search_by_code(state.db(), &params.code).await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from_db).collect()))
}

async fn get_course(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = services::courses::get(state.db(), course_id, user_id).await?;
    Ok(Json(CourseResponse::from_db(course)))
}

async fn list_course_exams(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Json<Vec<ExamResponse>>, ApiError> {
    let exams = services::exams::list_by_course(state.db(), course_id, user_id).await?;
    Ok(Json(exams.into_iter().map(ExamResponse::from_db).collect()))
}

async fn create_course(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Json(payload): Json<CourseInput>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let course = services::courses::create(state.db(), &payload, user_id).await?;
    Ok((StatusCode::CREATED, Json(CourseResponse::from_db(course))))
}

async fn update_course(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(payload): Json<CourseInput>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = services::courses::update(state.db(), course_id, &payload, user_id).await?;
    Ok(Json(CourseResponse::from_db(course)))
}

async fn delete_course(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Query(params): Query<DeleteCourseQuery>,
) -> Result<StatusCode, ApiError> {
    services::courses::delete(state.db(), course_id, user_id, params.force).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests;
