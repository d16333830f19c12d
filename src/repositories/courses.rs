use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::Course;

const COURSE_COLUMNS: &str =
    "id, course_code, course_name, instructor, term, user_id, created_at, updated_at";

pub(crate) struct CreateCourse<'a> {
    pub(crate) course_code: &'a str,
    pub(crate) course_name: &'a str,
    pub(crate) instructor: Option<&'a str>,
    pub(crate) term: &'a str,
    pub(crate) user_id: i64,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) struct UpdateCourse<'a> {
    pub(crate) course_code: &'a str,
    pub(crate) course_name: &'a str,
    pub(crate) instructor: Option<&'a str>,
    pub(crate) term: &'a str,
    pub(crate) updated_at: PrimitiveDateTime,
}

pub(crate) async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE user_id = $1 ORDER BY id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_by_user_and_term(
    pool: &PgPool,
    user_id: i64,
    term: &str,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE user_id = $1 AND term = $2 ORDER BY id"
    ))
    .bind(user_id)
    .bind(term)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring match on `course_code` across every owner.
pub(crate) async fn search_by_code(pool: &PgPool, code: &str) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE course_code ILIKE $1 ORDER BY course_code, id"
    ))
    .bind(contains_pattern(code))
    .fetch_all(pool)
    .await
}

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: i64,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"))
        .bind(course_id)
        .fetch_optional(executor)
        .await
}

/// Row-locks the course for the rest of the surrounding transaction.
pub(crate) async fn lock_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: i64,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1 FOR UPDATE"
    ))
    .bind(course_id)
    .fetch_optional(executor)
    .await
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateCourse<'_>,
) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO courses (
            course_code, course_name, instructor, term, user_id, created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$6)
         RETURNING {COURSE_COLUMNS}",
    ))
    .bind(params.course_code)
    .bind(params.course_name)
    .bind(params.instructor)
    .bind(params.term)
    .bind(params.user_id)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

/// Replaces the editable fields. `user_id` is not part of the statement.
pub(crate) async fn update(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: i64,
    params: UpdateCourse<'_>,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "UPDATE courses SET
            course_code = $1,
            course_name = $2,
            instructor = $3,
            term = $4,
            updated_at = $5
         WHERE id = $6
         RETURNING {COURSE_COLUMNS}",
    ))
    .bind(params.course_code)
    .bind(params.course_name)
    .bind(params.instructor)
    .bind(params.term)
    .bind(params.updated_at)
    .bind(course_id)
    .fetch_optional(executor)
    .await
}

pub(crate) async fn delete(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: i64,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM courses WHERE id = $1").bind(course_id).execute(executor).await?;
    Ok(result.rows_affected() > 0)
}

fn contains_pattern(code: &str) -> String {
    let mut escaped = String::with_capacity(code.len() + 2);
    escaped.push('%');
    for ch in code.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
