use sqlx::PgPool;
use time::{Date, Time};
use validator::Validate;

use crate::core::{metrics, time::primitive_now_utc};
use crate::db::models::ExamWithCourse;
use crate::db::types::ExamStatus;
use crate::repositories;
use crate::schemas::exam::ExamInput;
use crate::services::errors::{Entity, ServiceError};
use crate::services::ownership::ensure_owned;
use crate::services::validation::trimmed_optional;

/// Validated exam body. `status` falls back to `UPCOMING` when absent.
struct ExamFields<'a> {
    exam_type: &'a str,
    exam_date: Date,
    exam_time: Time,
    location: Option<&'a str>,
    duration: Option<f64>,
    status: ExamStatus,
}

impl<'a> ExamFields<'a> {
    fn from_input(input: &'a ExamInput) -> Result<Self, ServiceError> {
        input.validate()?;

        let missing = |field: &str| ServiceError::Validation(format!("{field} is required"));
        let status = match trimmed_optional(input.status.as_deref()) {
            Some(raw) => ExamStatus::parse(raw)?,
            None => ExamStatus::default(),
        };

        Ok(Self {
            exam_type: trimmed_optional(input.exam_type.as_deref())
                .ok_or_else(|| missing("exam_type"))?,
            exam_date: input.exam_date.ok_or_else(|| missing("exam_date"))?,
            exam_time: input.exam_time.ok_or_else(|| missing("exam_time"))?,
            location: trimmed_optional(input.location.as_deref()),
            duration: input.duration,
            status,
        })
    }
}

pub(crate) async fn list_by_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<ExamWithCourse>, ServiceError> {
    Ok(repositories::exams::list_by_owner(pool, user_id, None).await?)
}

pub(crate) async fn list_by_user_and_status(
    pool: &PgPool,
    user_id: i64,
    status: &str,
) -> Result<Vec<ExamWithCourse>, ServiceError> {
    let status = ExamStatus::parse(status)?;
    Ok(repositories::exams::list_by_owner(pool, user_id, Some(status)).await?)
}

/// `today` is the caller's notion of the current date in the schedule offset.
pub(crate) async fn list_today(
    pool: &PgPool,
    user_id: i64,
    today: Date,
) -> Result<Vec<ExamWithCourse>, ServiceError> {
    Ok(repositories::exams::list_on_date(pool, user_id, today).await?)
}

pub(crate) async fn list_in_range(
    pool: &PgPool,
    user_id: i64,
    start_date: Date,
    end_date: Date,
) -> Result<Vec<ExamWithCourse>, ServiceError> {
    if start_date > end_date {
        return Ok(Vec::new());
    }
    Ok(repositories::exams::list_between(pool, user_id, start_date, end_date).await?)
}

pub(crate) async fn list_by_course(
    pool: &PgPool,
    course_id: i64,
    user_id: i64,
) -> Result<Vec<ExamWithCourse>, ServiceError> {
    let course = repositories::courses::find_by_id(pool, course_id).await?;
    ensure_owned(course, Entity::Course, course_id, user_id)?;

    Ok(repositories::exams::list_by_course(pool, course_id).await?)
}

pub(crate) async fn get(
    pool: &PgPool,
    exam_id: i64,
    user_id: i64,
) -> Result<ExamWithCourse, ServiceError> {
    let exam = repositories::exams::find_by_id(pool, exam_id).await?;
    ensure_owned(exam, Entity::Exam, exam_id, user_id)
}

pub(crate) async fn create(
    pool: &PgPool,
    input: &ExamInput,
    user_id: i64,
) -> Result<ExamWithCourse, ServiceError> {
    let course_id = input
        .course_id
        .ok_or_else(|| ServiceError::Validation("course_id is required".to_string()))?;

    let mut tx = pool.begin().await?;

    let course = repositories::courses::lock_by_id(&mut *tx, course_id).await?;
    ensure_owned(course, Entity::Course, course_id, user_id)?;

    let fields = ExamFields::from_input(input)?;
    let exam = repositories::exams::create(
        &mut *tx,
        repositories::exams::CreateExam {
            course_id,
            exam_type: fields.exam_type,
            exam_date: fields.exam_date,
            exam_time: fields.exam_time,
            location: fields.location,
            duration: fields.duration,
            status: fields.status,
            created_at: primitive_now_utc(),
        },
    )
    .await?;

    tx.commit().await?;

    metrics::record_mutation("exam", "create");
    tracing::info!(
        user_id,
        course_id,
        exam_id = exam.id,
        action = "exam_create",
        "Exam created"
    );

    Ok(exam)
}

/// Full replace of the schedule fields; the owning course never changes.
pub(crate) async fn update(
    pool: &PgPool,
    exam_id: i64,
    input: &ExamInput,
    user_id: i64,
) -> Result<ExamWithCourse, ServiceError> {
    let mut tx = pool.begin().await?;

    let existing = repositories::exams::lock_by_id(&mut *tx, exam_id).await?;
    ensure_owned(existing, Entity::Exam, exam_id, user_id)?;

    let fields = ExamFields::from_input(input)?;
    let updated = repositories::exams::update(
        &mut *tx,
        exam_id,
        repositories::exams::UpdateExam {
            exam_type: fields.exam_type,
            exam_date: fields.exam_date,
            exam_time: fields.exam_time,
            location: fields.location,
            duration: fields.duration,
            status: fields.status,
        },
    )
    .await?
    .ok_or(ServiceError::NotFound { entity: Entity::Exam, id: exam_id })?;

    tx.commit().await?;

    metrics::record_mutation("exam", "update");
    tracing::info!(user_id, exam_id, action = "exam_update", "Exam updated");

    Ok(updated)
}

pub(crate) async fn update_status(
    pool: &PgPool,
    exam_id: i64,
    status: &str,
    user_id: i64,
) -> Result<ExamWithCourse, ServiceError> {
    let mut tx = pool.begin().await?;

    let existing = repositories::exams::lock_by_id(&mut *tx, exam_id).await?;
    ensure_owned(existing, Entity::Exam, exam_id, user_id)?;

    let status = ExamStatus::parse(status)?;
    let updated = repositories::exams::update_status(&mut *tx, exam_id, status)
        .await?
        .ok_or(ServiceError::NotFound { entity: Entity::Exam, id: exam_id })?;

    tx.commit().await?;

    metrics::record_mutation("exam", "status");
    tracing::info!(
        user_id,
        exam_id,
        status = %status,
        action = "exam_status_update",
        "Exam status changed"
    );

    Ok(updated)
}

pub(crate) async fn delete(pool: &PgPool, exam_id: i64, user_id: i64) -> Result<(), ServiceError> {
    let mut tx = pool.begin().await?;

    let existing = repositories::exams::lock_by_id(&mut *tx, exam_id).await?;
    ensure_owned(existing, Entity::Exam, exam_id, user_id)?;

    if !repositories::exams::delete_by_id(&mut *tx, exam_id).await? {
        return Err(ServiceError::NotFound { entity: Entity::Exam, id: exam_id });
    }

    tx.commit().await?;

    metrics::record_mutation("exam", "delete");
    tracing::info!(user_id, exam_id, action = "exam_delete", "Exam deleted");

    Ok(())
}
