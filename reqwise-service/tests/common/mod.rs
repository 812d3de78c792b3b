//! Common test utilities for reqwise-service integration tests.
//!
//! Tests build the full router and drive it in-process with
//! `tower::util::ServiceExt::oneshot` against the database named by
//! `TEST_DATABASE_URL`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use reqwise_service::{
    build_router,
    config::{
        AuthConfig, DatabaseConfig, Environment, RateLimitConfig, ReqwiseConfig, SecurityConfig,
    },
    db,
    middleware::create_ip_rate_limiter,
    services::{Database, JwtService},
    AppState,
};
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key-not-for-production";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Build the application against the test database.
pub async fn spawn_app() -> TestApp {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set to run database-backed tests");

    let config = ReqwiseConfig {
        environment: Environment::Dev,
        service_name: "reqwise-service-test".to_string(),
        service_version: "test".to_string(),
        log_level: "error".to_string(),
        port: 0,
        database: DatabaseConfig {
            url: database_url,
            max_connections: 2,
            min_connections: 1,
        },
        auth: AuthConfig {
            secret_key: TEST_SECRET.to_string(),
            access_token_expire_minutes: 30,
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        // Generous quotas so tests never trip the limiters
        rate_limit: RateLimitConfig {
            login_attempts: 1000,
            login_window_seconds: 60,
            register_attempts: 1000,
            register_window_seconds: 60,
            global_ip_limit: 10000,
            global_ip_window_seconds: 60,
        },
    };

    let pool = db::create_pool(&config.database)
        .await
        .expect("Failed to create test pool");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let database = Database::new(pool);
    let jwt = JwtService::new(
        &config.auth.secret_key,
        config.auth.access_token_expire_minutes,
    );

    let state = AppState {
        config: config.clone(),
        db: database,
        jwt,
        login_rate_limiter: create_ip_rate_limiter(
            config.rate_limit.login_attempts,
            config.rate_limit.login_window_seconds,
        ),
        register_rate_limiter: create_ip_rate_limiter(
            config.rate_limit.register_attempts,
            config.rate_limit.register_window_seconds,
        ),
        ip_rate_limiter: create_ip_rate_limiter(
            config.rate_limit.global_ip_limit,
            config.rate_limit.global_ip_window_seconds,
        ),
    };

    TestApp {
        router: build_router(state.clone()),
        state,
    }
}

/// Unique per-test names so concurrent runs do not collide on the unique
/// indexes.
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

impl TestApp {
    pub async fn request(&self, req: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("request failed")
    }

    pub async fn get(&self, uri: &str, token: &str) -> Response {
        self.request(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, token: &str, body: serde_json::Value) -> Response {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn put_json(&self, uri: &str, token: &str, body: serde_json::Value) -> Response {
        self.request(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn patch_json(&self, uri: &str, token: &str, body: serde_json::Value) -> Response {
        self.request(
            Request::builder()
                .method("PATCH")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response {
        self.request(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Register a user and return the response body.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> serde_json::Value {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
            "role": role,
        });
        let response = self
            .request(
                Request::builder()
                    .method("POST")
                    .uri("/users/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    /// Login with the password-grant form and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let form = format!("username={}&password={}", email, password);
        let response = self
            .request(
                Request::builder()
                    .method("POST")
                    .uri("/users/token")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form))
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        body["access_token"]
            .as_str()
            .expect("missing access_token")
            .to_string()
    }

    /// Register an owner, login, create a project, and return
    /// (token, project id).
    pub async fn owner_with_project(&self, prefix: &str) -> (String, i64) {
        let username = unique(prefix);
        let email = format!("{}@example.com", username);
        self.register(&username, &email, "securepassword123", "owner")
            .await;
        let token = self.login(&email, "securepassword123").await;

        let response = self
            .post_json(
                "/projects",
                &token,
                serde_json::json!({"name": "Test project", "description": "integration fixture"}),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let project = body_json(response).await;
        let project_id = project["id"].as_i64().expect("missing project id");

        (token, project_id)
    }
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}
