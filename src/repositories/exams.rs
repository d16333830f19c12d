use sqlx::{PgPool, Postgres, QueryBuilder};
use time::{Date, PrimitiveDateTime, Time};

use crate::db::models::ExamWithCourse;
use crate::db::types::ExamStatus;

/// Projection shared by every read; `e` is the exam row, `c` its course.
const VIEW_COLUMNS: &str = "\
    e.id, e.course_id, e.exam_type, e.exam_date, e.exam_time, e.location, \
    e.duration, e.status, e.created_at, \
    c.course_code, c.course_name, c.user_id AS owner_id";

const ORDER_BY_SCHEDULE: &str = " ORDER BY e.exam_date ASC, e.exam_time ASC, e.id ASC";

pub(crate) struct CreateExam<'a> {
    pub(crate) course_id: i64,
    pub(crate) exam_type: &'a str,
    pub(crate) exam_date: Date,
    pub(crate) exam_time: Time,
    pub(crate) location: Option<&'a str>,
    pub(crate) duration: Option<f64>,
    pub(crate) status: ExamStatus,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) struct UpdateExam<'a> {
    pub(crate) exam_type: &'a str,
    pub(crate) exam_date: Date,
    pub(crate) exam_time: Time,
    pub(crate) location: Option<&'a str>,
    pub(crate) duration: Option<f64>,
    pub(crate) status: ExamStatus,
}

pub(crate) async fn list_by_owner(
    pool: &PgPool,
    user_id: i64,
    status: Option<ExamStatus>,
) -> Result<Vec<ExamWithCourse>, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new(format!(
        "SELECT {VIEW_COLUMNS} FROM exams e JOIN courses c ON c.id = e.course_id \
         WHERE c.user_id = "
    ));
    builder.push_bind(user_id);

    if let Some(status) = status {
        builder.push(" AND e.status = ");
        builder.push_bind(status);
    }

    builder.push(ORDER_BY_SCHEDULE);
    builder.build_query_as::<ExamWithCourse>().fetch_all(pool).await
}

pub(crate) async fn list_on_date(
    pool: &PgPool,
    user_id: i64,
    date: Date,
) -> Result<Vec<ExamWithCourse>, sqlx::Error> {
    sqlx::query_as::<_, ExamWithCourse>(&format!(
        "SELECT {VIEW_COLUMNS} FROM exams e JOIN courses c ON c.id = e.course_id
         WHERE c.user_id = $1 AND e.exam_date = $2
         ORDER BY e.exam_time ASC, e.id ASC"
    ))
    .bind(user_id)
    .bind(date)
    .fetch_all(pool)
    .await
}

/// Both bounds inclusive.
pub(crate) async fn list_between(
    pool: &PgPool,
    user_id: i64,
    start_date: Date,
    end_date: Date,
) -> Result<Vec<ExamWithCourse>, sqlx::Error> {
    sqlx::query_as::<_, ExamWithCourse>(&format!(
        "SELECT {VIEW_COLUMNS} FROM exams e JOIN courses c ON c.id = e.course_id
         WHERE c.user_id = $1 AND e.exam_date BETWEEN $2 AND $3{ORDER_BY_SCHEDULE}"
    ))
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_by_course(
    pool: &PgPool,
    course_id: i64,
) -> Result<Vec<ExamWithCourse>, sqlx::Error> {
    sqlx::query_as::<_, ExamWithCourse>(&format!(
        "SELECT {VIEW_COLUMNS} FROM exams e JOIN courses c ON c.id = e.course_id
         WHERE e.course_id = $1{ORDER_BY_SCHEDULE}"
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<Option<ExamWithCourse>, sqlx::Error> {
    sqlx::query_as::<_, ExamWithCourse>(&format!(
        "SELECT {VIEW_COLUMNS} FROM exams e JOIN courses c ON c.id = e.course_id WHERE e.id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Row-locks the exam (not its course) for the surrounding transaction.
pub(crate) async fn lock_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<Option<ExamWithCourse>, sqlx::Error> {
    sqlx::query_as::<_, ExamWithCourse>(&format!(
        "SELECT {VIEW_COLUMNS} FROM exams e JOIN courses c ON c.id = e.course_id
         WHERE e.id = $1
         FOR UPDATE OF e"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateExam<'_>,
) -> Result<ExamWithCourse, sqlx::Error> {
    sqlx::query_as::<_, ExamWithCourse>(&format!(
        "WITH e AS (
            INSERT INTO exams (
                course_id, exam_type, exam_date, exam_time, location, duration, status, created_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            RETURNING *
         )
         SELECT {VIEW_COLUMNS} FROM e JOIN courses c ON c.id = e.course_id",
    ))
    .bind(params.course_id)
    .bind(params.exam_type)
    .bind(params.exam_date)
    .bind(params.exam_time)
    .bind(params.location)
    .bind(params.duration)
    .bind(params.status)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

/// Full replace of the schedule fields. `course_id` and `created_at` are never written.
pub(crate) async fn update(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
    params: UpdateExam<'_>,
) -> Result<Option<ExamWithCourse>, sqlx::Error> {
    sqlx::query_as::<_, ExamWithCourse>(&format!(
        "WITH e AS (
            UPDATE exams SET
                exam_type = $1,
                exam_date = $2,
                exam_time = $3,
                location = $4,
                duration = $5,
                status = $6
            WHERE id = $7
            RETURNING *
         )
         SELECT {VIEW_COLUMNS} FROM e JOIN courses c ON c.id = e.course_id",
    ))
    .bind(params.exam_type)
    .bind(params.exam_date)
    .bind(params.exam_time)
    .bind(params.location)
    .bind(params.duration)
    .bind(params.status)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub(crate) async fn update_status(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
    status: ExamStatus,
) -> Result<Option<ExamWithCourse>, sqlx::Error> {
    sqlx::query_as::<_, ExamWithCourse>(&format!(
        "WITH e AS (
            UPDATE exams SET status = $1 WHERE id = $2 RETURNING *
         )
         SELECT {VIEW_COLUMNS} FROM e JOIN courses c ON c.id = e.course_id",
    ))
    .bind(status)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub(crate) async fn delete_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM exams WHERE id = $1").bind(id).execute(executor).await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) async fn delete_by_course(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM exams WHERE course_id = $1")
        .bind(course_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn count_by_course(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM exams WHERE course_id = $1")
        .bind(course_id)
        .fetch_one(executor)
        .await
}
