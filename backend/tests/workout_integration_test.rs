//! Integration tests for workout templates and sessions

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

async fn create_template(app: &common::TestApp, token: &str, name: &str) -> String {
    let (status, body) = app
        .post_auth(
            "/api/v1/templates",
            &json!({
                "name": name,
                "exercises": [
                    {"name": "Squat", "sets": [{"weight": 100, "reps": 5}], "recommended_sets": 3},
                    {"name": "Lunge"}
                ]
            }),
            token,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    common::json(&body)["id"].as_str().unwrap().to_string()
}

fn session_body(template_id: &str, date: &str, squat_weight: &str) -> Value {
    json!({
        "template_id": template_id,
        "template_name": "Legs",
        "exercises": [
            {"name": "Squat", "sets": [{"weight": squat_weight, "reps": "5"}, {"weight": "", "reps": ""}]}
        ],
        "elapsed_seconds": 2710,
        "local_date": date
    })
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_template_crud() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();
    let id = create_template(&app, &token, "Legs").await;
    let path = format!("/api/v1/templates/{}", id);

    let (status, body) = app.get_auth(&path, &token).await;
    assert_eq!(status, StatusCode::OK);
    let template = common::json(&body);
    assert_eq!(template["name"], "Legs");
    assert_eq!(template["exercises"][0]["prefilled_sets"][0]["weight"], "100");

    let (status, body) = app
        .put_auth(
            &path,
            &json!({"name": "Leg Day", "exercises": [{"name": "Deadlift"}]}),
            &token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json(&body)["exercises"][0]["name"], "Deadlift");

    let (_, body) = app.get_auth("/api/v1/templates", &token).await;
    assert_eq!(common::json(&body)["templates"].as_array().unwrap().len(), 1);

    let (status, _) = app.delete_auth(&path, &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get_auth(&path, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_template_validation() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();

    let (status, body) = app
        .post_auth(
            "/api/v1/templates",
            &json!({"name": "Empty", "exercises": []}),
            &token,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::json(&body)["error"]["field"], "exercises");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_templates_are_private() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();
    let other = app.new_owner();
    let id = create_template(&app, &token, "Push").await;

    let (status, _) = app
        .get_auth(&format!("/api/v1/templates/{}", id), &other)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_latest_session_for_template() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();
    let id = create_template(&app, &token, "Legs").await;
    let latest = format!("/api/v1/sessions/latest?template_id={}", id);

    let (status, body) = app.get_auth(&latest, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(common::json(&body)["session"].is_null());

    for (date, weight) in [("2024-06-01", "100"), ("2024-06-04", "105")] {
        let (status, body) = app
            .post_auth("/api/v1/sessions", &session_body(&id, date, weight), &token)
            .await;
        assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    }

    let (_, body) = app.get_auth(&latest, &token).await;
    let session = &common::json(&body)["session"];
    assert_eq!(session["local_date"], "2024-06-04");
    assert_eq!(session["elapsed_seconds"], 2710);
    // Blank sets are kept as entered
    assert_eq!(session["exercises"][0]["sets"].as_array().unwrap().len(), 2);
    assert_eq!(session["exercises"][0]["sets"][0]["weight"], "105");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_sessions_survive_template_deletion() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();
    let id = create_template(&app, &token, "Legs").await;

    app.post_auth("/api/v1/sessions", &session_body(&id, "2024-06-01", "90"), &token)
        .await;
    app.delete_auth(&format!("/api/v1/templates/{}", id), &token)
        .await;

    let (status, body) = app
        .get_auth(&format!("/api/v1/sessions?template_id={}", id), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let sessions = common::json(&body)["sessions"].as_array().unwrap().clone();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["template_name"], "Legs");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_latest_session_needs_template_id() {
    let app = common::TestApp::new().await;
    let token = app.new_owner();

    let (status, _) = app.get_auth("/api/v1/sessions/latest", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
