//! Customer-role access integration tests: read paths and the mutation
//! rejections.

mod common;

use axum::http::StatusCode;
use common::{body_json, spawn_app, unique};

async fn customer_token(app: &common::TestApp, prefix: &str) -> String {
    let username = unique(prefix);
    let email = format!("{}@example.com", username);
    app.register(&username, &email, "securepassword123", "customer")
        .await;
    app.login(&email, "securepassword123").await
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn customer_lists_all_projects() {
    let app = spawn_app().await;

    let (_owner_token, project_id) = app.owner_with_project("proj-visible").await;
    let token = customer_token(&app, "bob-list").await;

    let response = app.get("/projects?skip=0&limit=100", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let projects = body_json(response).await;
    let ids: Vec<i64> = projects
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&project_id));
}

#[tokio::test]
#[ignore] // Requires database
async fn customer_reads_project_requirements() {
    let app = spawn_app().await;

    let (owner_token, project_id) = app.owner_with_project("proj-read").await;
    let response = app
        .post_json(
            &format!("/projects/{}/requirements", project_id),
            &owner_token,
            serde_json::json!({"description": "Readable by customers"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let token = customer_token(&app, "bob-read").await;
    let response = app
        .get(&format!("/projects/{}/requirements", project_id), &token)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let requirements = body_json(response).await;
    assert_eq!(requirements.as_array().unwrap().len(), 1);
    assert_eq!(requirements[0]["description"], "Readable by customers");
}

#[tokio::test]
#[ignore] // Requires database
async fn customer_cannot_mutate_requirements() {
    let app = spawn_app().await;

    let (owner_token, project_id) = app.owner_with_project("proj-mutate").await;
    let response = app
        .post_json(
            &format!("/projects/{}/requirements", project_id),
            &owner_token,
            serde_json::json!({"description": "Hands off, customers"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let requirement = body_json(response).await;
    let requirement_id = requirement["id"].as_i64().unwrap();

    let token = customer_token(&app, "bob-mutate").await;

    let response = app
        .put_json(
            &format!("/requirements/{}", requirement_id),
            &token,
            serde_json::json!({"description": "customer edit attempt"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .delete(&format!("/requirements/{}", requirement_id), &token)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post_json(
            &format!("/projects/{}/requirements", project_id),
            &token,
            serde_json::json!({"description": "customer create attempt"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore] // Requires database
async fn requirements_of_missing_project_are_not_found() {
    let app = spawn_app().await;

    let token = customer_token(&app, "bob-404").await;
    let response = app.get("/projects/999999999/requirements", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore] // Requires database
async fn deleted_requirement_disappears_from_listing() {
    let app = spawn_app().await;

    let (owner_token, project_id) = app.owner_with_project("proj-delete").await;
    let response = app
        .post_json(
            &format!("/projects/{}/requirements", project_id),
            &owner_token,
            serde_json::json!({"description": "Short-lived requirement"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let requirement = body_json(response).await;
    let requirement_id = requirement["id"].as_i64().unwrap();

    let response = app
        .delete(&format!("/requirements/{}", requirement_id), &owner_token)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let token = customer_token(&app, "bob-delete").await;
    let response = app
        .get(&format!("/projects/{}/requirements", project_id), &token)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let requirements = body_json(response).await;
    assert!(requirements.as_array().unwrap().is_empty());
}
