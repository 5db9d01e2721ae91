//! Integration tests for the found-report endpoints and point awards.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, register_user};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: Filing a found report awards the base points
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filing_a_found_report_awards_base_points() {
    let app = common::build_test_app();
    let finder = register_user(&app, "bob").await;

    let response = post_json(
        &app,
        "/api/v1/found-documents",
        json!({
            "found_by": finder["id"],
            "found_location": "Beira",
            "document_type": "passport",
            "description": "Blue passport at the bus stop",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let report = body_json(response).await;
    assert_eq!(report["status"], "pending");

    let finder = body_json(get(&app, &format!("/api/v1/users/{}", finder["id"])).await).await;
    assert_eq!(finder["points"], 20);

    let feed = body_json(get(&app, "/api/v1/found-documents").await).await;
    assert_eq!(feed.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: Possible matches earn the bonus
// ---------------------------------------------------------------------------

#[tokio::test]
async fn possible_matches_earn_the_bonus() {
    let app = common::build_test_app();
    let finder = register_user(&app, "bob").await;

    let response = post_json(
        &app,
        "/api/v1/found-documents",
        json!({
            "found_by": finder["id"],
            "found_location": "Beira",
            "document_type": "id_card",
            "description": "ID card with a visible name",
            "possible_matches": [1, 2],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let finder = body_json(get(&app, &format!("/api/v1/users/{}", finder["id"])).await).await;
    assert_eq!(finder["points"], 50);
}

// ---------------------------------------------------------------------------
// Test: Unknown finder
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filing_for_an_unknown_finder_returns_404() {
    let app = common::build_test_app();

    let response = post_json(
        &app,
        "/api/v1/found-documents",
        json!({
            "found_by": 9999,
            "found_location": "Beira",
            "document_type": "passport",
            "description": "orphan report",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let feed = body_json(get(&app, "/api/v1/found-documents").await).await;
    assert!(feed.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn an_empty_description_is_rejected() {
    let app = common::build_test_app();
    let finder = register_user(&app, "bob").await;

    let response = post_json(
        &app,
        "/api/v1/found-documents",
        json!({
            "found_by": finder["id"],
            "found_location": "Beira",
            "document_type": "passport",
            "description": "",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
