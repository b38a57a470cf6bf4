//! Integration tests for weight endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_log_weight_keeps_unit_and_local_date() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();

    let (status, body) = app
        .post_auth(
            "/api/v1/weight",
            &json!({
                "weight": 176.5,
                "unit": "lbs",
                "recorded_at": "2024-03-02T03:30:00Z",
                "utc_offset_minutes": -300
            }),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    let entry = common::json(&body);
    assert_eq!(entry["weight_value"], 176.5);
    assert_eq!(entry["unit"], "lbs");
    // 03:30Z at UTC-5 is still the 1st locally
    assert_eq!(entry["local_date"], "2024-03-01");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_log_weight_defaults_to_kg() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();

    let (status, body) = app
        .post_auth("/api/v1/weight", &json!({"weight": 80.2}), &token)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(common::json(&body)["unit"], "kg");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_log_weight_validation() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();

    let (status, body) = app
        .post_auth("/api/v1/weight", &json!({"weight": -1.0}), &token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::json(&body)["error"]["field"], "weight");

    let (status, body) = app
        .post_auth(
            "/api/v1/weight",
            &json!({"weight": 80.0, "unit": "furlongs"}),
            &token,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::json(&body)["error"]["field"], "unit");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_weight_requires_token() {
    let app = common::TestApp::new().await;

    let (status, _) = app.get("/api/v1/weight").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.post("/api/v1/weight", &json!({"weight": 80.0})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_list_weights_filters_by_range_and_owner() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();
    let other = app.new_owner();

    for (date, value) in [("2024-03-01", 81.0), ("2024-03-05", 80.5), ("2024-03-09", 80.0)] {
        let (status, _) = app
            .post_auth(
                "/api/v1/weight",
                &json!({"weight": value, "local_date": date}),
                &token,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    app.post_auth(
        "/api/v1/weight",
        &json!({"weight": 60.0, "local_date": "2024-03-05"}),
        &other,
    )
    .await;

    let (status, body) = app
        .get_auth("/api/v1/weight?from=2024-03-02&to=2024-03-09", &token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let weights = common::json(&body)["weights"].as_array().unwrap().clone();
    assert_eq!(weights.len(), 2);
    assert_eq!(weights[0]["local_date"], "2024-03-09");
    assert_eq!(weights[1]["local_date"], "2024-03-05");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_weight_is_owner_scoped() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();
    let other = app.new_owner();

    let (_, body) = app
        .post_auth("/api/v1/weight", &json!({"weight": 79.0}), &token)
        .await;
    let id = common::json(&body)["id"].as_str().unwrap().to_string();
    let path = format!("/api/v1/weight/{}", id);

    let (status, _) = app.delete_auth(&path, &other).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete_auth(&path, &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.delete_auth(&path, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
