pub mod config;
pub mod db;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod services;
pub mod utils;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{openapi::security::SecurityScheme, Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ReqwiseConfig;
use crate::error::AppError;
use crate::middleware::{ip_rate_limit_middleware, IpRateLimiter};
use crate::services::{Database, JwtService};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        handlers::users::register,
        handlers::users::login,
        handlers::projects::create_project,
        handlers::projects::list_owner_projects,
        handlers::projects::list_all_projects,
        handlers::requirements::create_requirement,
        handlers::requirements::list_project_requirements,
        handlers::requirements::update_requirement,
        handlers::requirements::update_requirement_status,
        handlers::requirements::delete_requirement,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::users::RegisterRequest,
            dtos::users::UserResponse,
            dtos::users::LoginForm,
            dtos::users::TokenResponse,
            dtos::projects::CreateProjectRequest,
            dtos::projects::ProjectResponse,
            dtos::requirements::CreateRequirementRequest,
            dtos::requirements::UpdateRequirementRequest,
            dtos::requirements::RequirementStatusUpdate,
            dtos::requirements::RequirementResponse,
            models::UserRole,
            models::RequirementType,
            models::RequirementStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration and token issuance"),
        (name = "Projects", description = "Project management"),
        (name = "Requirements", description = "Requirement management"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: ReqwiseConfig,
    pub db: Database,
    pub jwt: JwtService,
    pub login_rate_limiter: IpRateLimiter,
    pub register_rate_limiter: IpRateLimiter,
    pub ip_rate_limiter: IpRateLimiter,
}

pub fn build_router(state: AppState) -> Router {
    // Login and register get their own, tighter limiters
    let login_limiter = state.login_rate_limiter.clone();
    let login_route = Router::new()
        .route("/users/token", post(handlers::users::login))
        .layer(from_fn_with_state(login_limiter, ip_rate_limit_middleware));

    let register_limiter = state.register_rate_limiter.clone();
    let register_route = Router::new()
        .route("/users/register", post(handlers::users::register))
        .layer(from_fn_with_state(
            register_limiter,
            ip_rate_limit_middleware,
        ));

    // Everything behind the bearer-token resolver
    let protected_routes = Router::new()
        .route(
            "/projects",
            post(handlers::projects::create_project).get(handlers::projects::list_all_projects),
        )
        .route(
            "/projects/owner",
            get(handlers::projects::list_owner_projects),
        )
        .route(
            "/projects/:project_id/requirements",
            post(handlers::requirements::create_requirement)
                .get(handlers::requirements::list_project_requirements),
        )
        .route(
            "/requirements/:requirement_id",
            put(handlers::requirements::update_requirement)
                .delete(handlers::requirements::delete_requirement),
        )
        .route(
            "/requirements/:requirement_id/status",
            patch(handlers::requirements::update_requirement_status),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let ip_limiter = state.ip_rate_limiter.clone();

    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .security
                .allowed_origins
                .iter()
                .map(|origin| {
                    origin.parse::<HeaderValue>().unwrap_or_else(|e| {
                        tracing::error!("Invalid CORS origin '{}': {}. Using fallback.", origin, e);
                        HeaderValue::from_static("*")
                    })
                })
                .collect::<Vec<HeaderValue>>(),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(login_route)
        .merge(register_route)
        .merge(protected_routes)
        .with_state(state)
        // Global IP rate limiting
        .layer(from_fn_with_state(ip_limiter, ip_rate_limit_middleware))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(middleware::tracing::request_id_middleware))
        .layer(from_fn(
            middleware::security_headers::security_headers_middleware,
        ))
        .layer(cors)
}

/// Service health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 500, description = "Service is unhealthy")
    ),
    tag = "Observability"
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.db.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "PostgreSQL health check failed");
        e
    })?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "environment": format!("{:?}", state.config.environment),
        "checks": {
            "postgres": "up"
        }
    })))
}
