use sqlx::PgPool;
use validator::Validate;

use crate::core::{metrics, time::primitive_now_utc};
use crate::db::{is_foreign_key_violation, models::Course};
use crate::repositories;
use crate::schemas::course::CourseInput;
use crate::services::errors::{Entity, ServiceError};
use crate::services::ownership::ensure_owned;
use crate::services::validation::trimmed_optional;

/// Validated, trimmed course fields borrowed from the request body.
struct CourseFields<'a> {
    course_code: &'a str,
    course_name: &'a str,
    instructor: Option<&'a str>,
    term: &'a str,
}

impl<'a> CourseFields<'a> {
    fn from_input(input: &'a CourseInput) -> Result<Self, ServiceError> {
        input.validate()?;

        let required = |value: &'a Option<String>, field: &str| {
            trimmed_optional(value.as_deref())
                .ok_or_else(|| ServiceError::Validation(format!("{field} is required")))
        };

        Ok(Self {
            course_code: required(&input.course_code, "course_code")?,
            course_name: required(&input.course_name, "course_name")?,
            instructor: trimmed_optional(input.instructor.as_deref()),
            term: required(&input.term, "term")?,
        })
    }
}

pub(crate) async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Course>, ServiceError> {
    Ok(repositories::courses::list_by_user(pool, user_id).await?)
}

pub(crate) async fn list_by_user_and_term(
    pool: &PgPool,
    user_id: i64,
    term: &str,
) -> Result<Vec<Course>, ServiceError> {
    Ok(repositories::courses::list_by_user_and_term(pool, user_id, term).await?)
}

pub(crate) async fn get(
    pool: &PgPool,
    course_id: i64,
    user_id: i64,
) -> Result<Course, ServiceError> {
    let course = repositories::courses::find_by_id(pool, course_id).await?;
    ensure_owned(course, Entity::Course, course_id, user_id)
}

pub(crate) async fn create(
    pool: &PgPool,
    input: &CourseInput,
    user_id: i64,
) -> Result<Course, ServiceError> {
    let fields = CourseFields::from_input(input)?;

    let course = repositories::courses::create(
        pool,
        repositories::courses::CreateCourse {
            course_code: fields.course_code,
            course_name: fields.course_name,
            instructor: fields.instructor,
            term: fields.term,
            user_id,
            created_at: primitive_now_utc(),
        },
    )
    .await?;

    metrics::record_mutation("course", "create");
    tracing::info!(user_id, course_id = course.id, action = "course_create", "Course created");

    Ok(course)
}

pub(crate) async fn update(
    pool: &PgPool,
    course_id: i64,
    input: &CourseInput,
    user_id: i64,
) -> Result<Course, ServiceError> {
    let mut tx = pool.begin().await?;

    let existing = repositories::courses::lock_by_id(&mut *tx, course_id).await?;
    ensure_owned(existing, Entity::Course, course_id, user_id)?;

    let fields = CourseFields::from_input(input)?;
    let updated = repositories::courses::update(
        &mut *tx,
        course_id,
        repositories::courses::UpdateCourse {
            course_code: fields.course_code,
            course_name: fields.course_name,
            instructor: fields.instructor,
            term: fields.term,
            updated_at: primitive_now_utc(),
        },
    )
    .await?
    .ok_or(ServiceError::NotFound { entity: Entity::Course, id: course_id })?;

    tx.commit().await?;

    metrics::record_mutation("course", "update");
    tracing::info!(user_id, course_id, action = "course_update", "Course updated");

    Ok(updated)
}

/// Removes a course. A course that still has exams is only removed with
/// `force`, in which case its exams go first within the same transaction.
/// Returns the number of exams removed alongside it.
pub(crate) async fn delete(
    pool: &PgPool,
    course_id: i64,
    user_id: i64,
    force: bool,
) -> Result<u64, ServiceError> {
    let mut tx = pool.begin().await?;

    let existing = repositories::courses::lock_by_id(&mut *tx, course_id).await?;
    ensure_owned(existing, Entity::Course, course_id, user_id)?;

    let exam_count = repositories::exams::count_by_course(&mut *tx, course_id).await?;
    if exam_count > 0 && !force {
        return Err(ServiceError::Conflict(format!(
            "Course {course_id} still has {exam_count} exam(s); delete them or pass force=true"
        )));
    }

    let exams_removed = if force {
        repositories::exams::delete_by_course(&mut *tx, course_id).await?
    } else {
        0
    };

    let deleted = repositories::courses::delete(&mut *tx, course_id).await.map_err(|err| {
        if is_foreign_key_violation(&err) {
            ServiceError::Conflict(format!("Course {course_id} is still referenced by exams"))
        } else {
            ServiceError::Database(err)
        }
    })?;

    if !deleted {
        return Err(ServiceError::NotFound { entity: Entity::Course, id: course_id });
    }

    tx.commit().await?;

    metrics::record_mutation("course", "delete");
    tracing::info!(
        user_id,
        course_id,
        exams_removed,
        action = "course_delete",
        "Course deleted"
    );

    Ok(exams_removed)
}

/// Unscoped: matches courses of every user.
pub(crate) async fn search_by_code(pool: &PgPool, code: &str) -> Result<Vec<Course>, ServiceError> {
    Ok(repositories::courses::search_by_code(pool, code).await?)
}
