use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use time::Date;

use crate::api::errors::ApiError;
use crate::api::guards::CallerId;
use crate::core::state::AppState;
use crate::core::time::parse_date;
use crate::db::models::ExamWithCourse;
use crate::schemas::exam::{ExamInput, ExamResponse};
use crate::services;

use super::queries::{ListExamsQuery, RangeQuery, StatusQuery};

fn to_responses(exams: Vec<ExamWithCourse>) -> Json<Vec<ExamResponse>> {
    Json(exams.into_iter().map(ExamResponse::from_db).collect())
}

fn parse_query_date(field: &str, raw: &str) -> Result<Date, ApiError> {
    parse_date(raw)
        .ok_or_else(|| ApiError::BadRequest(format!("{field} must be YYYY-MM-DD, got '{raw}'")))
}

pub(super) async fn list_exams(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Query(params): Query<ListExamsQuery>,
) -> Result<Json<Vec<ExamResponse>>, ApiError> {
    let exams = match params.status.as_deref().filter(|status| !status.trim().is_empty()) {
        Some(status) => {
            services::exams::list_by_user_and_status(state.db(), user_id, status).await?
        }
        None => services::exams::list_by_user(state.db(), user_id).await?,
    };

    Ok(to_responses(exams))
}

pub(super) async fn list_today(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
) -> Result<Json<Vec<ExamResponse>>, ApiError> {
    let exams = services::exams::list_today(state.db(), user_id, state.today()).await?;
    Ok(to_responses(exams))
}

pub(super) async fn list_in_range(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Query(params): Query<RangeQuery>,
) -> Result<Json<Vec<ExamResponse>>, ApiError> {
    let start_date = parse_query_date("startDate", &params.start_date)?;
    let end_date = parse_query_date("endDate", &params.end_date)?;

    let exams = services::exams::list_in_range(state.db(), user_id, start_date, end_date).await?;
    Ok(to_responses(exams))
}

pub(super) async fn get_exam(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> Result<Json<ExamResponse>, ApiError> {
    let exam = services::exams::get(state.db(), exam_id, user_id).await?;
    Ok(Json(ExamResponse::from_db(exam)))
}

pub(super) async fn create_exam(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Json(payload): Json<ExamInput>,
) -> Result<(StatusCode, Json<ExamResponse>), ApiError> {
    let exam = services::exams::create(state.db(), &payload, user_id).await?;
    Ok((StatusCode::CREATED, Json(ExamResponse::from_db(exam))))
}

pub(super) async fn update_exam(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
    Json(payload): Json<ExamInput>,
) -> Result<Json<ExamResponse>, ApiError> {
    let exam = services::exams::update(state.db(), exam_id, &payload, user_id).await?;
    Ok(Json(ExamResponse::from_db(exam)))
}

pub(super) async fn update_status(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
    Query(params): Query<StatusQuery>,
) -> Result<Json<ExamResponse>, ApiError> {
    let exam = services::exams::update_status(state.db(), exam_id, &params.status, user_id).await?;
    Ok(Json(ExamResponse::from_db(exam)))
}

pub(super) async fn delete_exam(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    services::exams::delete(state.db(), exam_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
