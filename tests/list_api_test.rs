//! List api integration tests
//!
//! Drives the axum router directly with oneshot requests

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mentorclap::listing::catalog::Catalog;
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    mentorclap::web::router(Catalog::mock(5))
}

async fn call(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = call("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "up");
}

#[tokio::test]
async fn test_blogs_first_page_envelope() {
    let (status, body) = call("/api/blogs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["code"].as_str().unwrap().ends_with("-0000-0000-0000"));
    assert_eq!(body["data"]["totalCount"], 12);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["pageSize"], 5);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["items"][0]["slug"], "board-exam-revision-plan");
}

#[tokio::test]
async fn test_blogs_last_page_is_partial() {
    let (_, body) = call("/api/blogs?page=3").await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["id"], 12);
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let (status, body) = call("/api/blogs?page=18446744073709551615").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCount"], 12);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_enquiries_search_and_filters() {
    let (status, body) = call("/api/enquiries?search=pune&mode=online&page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCount"], 2);
    let students: Vec<&str> = body["data"]["items"].as_array().unwrap().iter().map(|e| e["student"].as_str().unwrap()).collect();
    assert_eq!(students, vec!["Diya", "Kiara"]);
}

#[tokio::test]
async fn test_unknown_filter_keys_pass_through() {
    let (_, body) = call("/api/faqs?category=tutors&utm_source=mail&page=1").await;
    assert_eq!(body["data"]["totalCount"], 3);
}

#[tokio::test]
async fn test_invalid_page_is_bad_request() {
    let (status, body) = call("/api/blogs?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["code"].as_str().unwrap().ends_with("-LIST-QURY-0002"));
    assert!(body.get("data").is_none());

    let (status, body) = call("/api/enquiries?page=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["code"].as_str().unwrap().ends_with("-LIST-QURY-0001"));
    assert!(body["message"].as_str().unwrap().contains("page is not a number"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, body) = call("/api/tutors").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "not found");
}
