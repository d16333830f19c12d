use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::repositories;
use crate::test_support;

fn course_payload(code: &str, term: &str) -> serde_json::Value {
    json!({
        "courseCode": code,
        "courseName": "Intro to Programming",
        "instructor": "Dr. Smith",
        "term": term
    })
}

#[tokio::test]
async fn create_and_fetch_course() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/courses?userId=1",
            Some(course_payload("COMP101", "Fall 2024")),
        ))
        .await
        .expect("create course");

    let status = response.status();
    let created = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {created}");
    assert_eq!(created["course_code"], "COMP101");
    assert_eq!(created["user_id"], 1);
    let course_id = created["id"].as_i64().expect("course id");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/courses/{course_id}?userId=1"),
            None,
        ))
        .await
        .expect("get course");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = test_support::read_json(response).await;
    assert_eq!(fetched, created);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/courses/{course_id}?userId=2"),
            None,
        ))
        .await
        .expect("foreign get");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = test_support::read_json(response).await;
    assert_eq!(body["detail"], "Unauthorized access to course");
}

#[tokio::test]
async fn create_with_blank_name_is_rejected() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/courses?userId=1",
            Some(json!({ "course_code": "COMP101", "course_name": "  ", "term": "Fall 2024" })),
        ))
        .await
        .expect("create course");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = test_support::read_json(response).await;
    assert_eq!(body["detail"], "course_name is required");
}

#[tokio::test]
async fn list_filters_by_term() {
    let ctx = test_support::setup_test_context().await;
    test_support::insert_course(ctx.state.db(), "COMP101", "Fall 2024", 1).await;
    test_support::insert_course(ctx.state.db(), "MATH200", "Spring 2025", 1).await;
    test_support::insert_course(ctx.state.db(), "PHYS100", "Fall 2024", 2).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/courses?userId=1&term=Fall%202024",
            None,
        ))
        .await
        .expect("list by term");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    let codes: Vec<_> = body.as_array().unwrap().iter().map(|c| c["course_code"].clone()).collect();
    assert_eq!(codes, vec![json!("COMP101")]);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/courses?userId=1&term=", None))
        .await
        .expect("list all");
    let body = test_support::read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn search_ignores_owner() {
    let ctx = test_support::setup_test_context().await;
    test_support::insert_course(ctx.state.db(), "COMP101", "Fall 2024", 1).await;
    test_support::insert_course(ctx.state.db(), "COMP330", "Fall 2024", 2).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/courses/search?code=comp", None))
        .await
        .expect("search");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_owner() {
    let ctx = test_support::setup_test_context().await;
    let course_id = test_support::insert_course(ctx.state.db(), "COMP101", "Fall 2024", 1).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("/api/courses/{course_id}?userId=1"),
            Some(json!({
                "course_code": "COMP102",
                "course_name": "Data Structures",
                "term": "Spring 2025",
                "user_id": 99
            })),
        ))
        .await
        .expect("update course");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["id"], course_id);
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["course_code"], "COMP102");
    assert!(body["instructor"].is_null());
}

#[tokio::test]
async fn delete_blocks_on_exams_unless_forced() {
    let ctx = test_support::setup_test_context().await;
    let course_id = test_support::insert_course(ctx.state.db(), "COMP101", "Fall 2024", 1).await;
    test_support::insert_exam(ctx.state.db(), course_id, "Midterm", "2024-11-15").await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/courses/{course_id}?userId=1"),
            None,
        ))
        .await
        .expect("delete course");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/courses/{course_id}?userId=1&force=true"),
            None,
        ))
        .await
        .expect("force delete course");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let found = repositories::courses::find_by_id(ctx.state.db(), course_id)
        .await
        .expect("find course after deletion");
    assert!(found.is_none());
}

#[tokio::test]
async fn missing_course_is_not_found() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/courses/4242?userId=1", None))
        .await
        .expect("get course");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = test_support::read_json(response).await;
    assert_eq!(body["detail"], "Course not found with id: 4242");
}
