use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    dtos::projects::{CreateProjectRequest, ProjectResponse},
    dtos::{ErrorResponse, Pagination},
    error::AppError,
    middleware::{CustomerUser, OwnerUser},
    utils::ValidatedJson,
    AppState,
};

/// Create a new project (Owner only)
#[utoipa::path(
    post,
    path = "/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Owner role required", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    OwnerUser(owner): OwnerUser,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let project = state
        .db
        .create_project(&req.name, req.description.as_deref(), owner.id)
        .await?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

/// List the caller's own projects (Owner only)
#[utoipa::path(
    get,
    path = "/projects/owner",
    params(Pagination),
    responses(
        (status = 200, description = "Projects owned by the caller", body = [ProjectResponse]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Owner role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn list_owner_projects(
    State(state): State<AppState>,
    OwnerUser(owner): OwnerUser,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let projects = state
        .db
        .list_projects_by_owner(owner.id, pagination.skip(), pagination.limit())
        .await?;

    let projects: Vec<ProjectResponse> = projects.into_iter().map(ProjectResponse::from).collect();
    Ok(Json(projects))
}

/// List all projects (Customer only)
#[utoipa::path(
    get,
    path = "/projects",
    params(Pagination),
    responses(
        (status = 200, description = "All projects", body = [ProjectResponse]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Customer role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn list_all_projects(
    State(state): State<AppState>,
    CustomerUser(_user): CustomerUser,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let projects = state
        .db
        .list_all_projects(pagination.skip(), pagination.limit())
        .await?;

    let projects: Vec<ProjectResponse> = projects.into_iter().map(ProjectResponse::from).collect();
    Ok(Json(projects))
}
