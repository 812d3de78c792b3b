use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    dtos::requirements::{
        CreateRequirementRequest, RequirementResponse, RequirementStatusUpdate,
        UpdateRequirementRequest,
    },
    dtos::{ErrorResponse, Pagination},
    error::AppError,
    middleware::{CustomerUser, OwnerUser},
    services::{require_project_ownership, require_requirement_ownership},
    utils::ValidatedJson,
    AppState,
};

/// Create a requirement under a project (Owner only, own projects)
#[utoipa::path(
    post,
    path = "/projects/{project_id}/requirements",
    params(("project_id" = i64, Path, description = "Project to attach the requirement to")),
    request_body = CreateRequirementRequest,
    responses(
        (status = 201, description = "Requirement created", body = RequirementResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the project owner", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Requirements"
)]
pub async fn create_requirement(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    OwnerUser(owner): OwnerUser,
    ValidatedJson(req): ValidatedJson<CreateRequirementRequest>,
) -> Result<impl IntoResponse, AppError> {
    let project = state
        .db
        .get_project(project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Project not found")))?;

    require_project_ownership(&owner, &project)?;

    let requirement = state
        .db
        .create_requirement(&req.description, req.kind, project_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RequirementResponse::from(requirement)),
    ))
}

/// List a project's requirements (Customer only)
#[utoipa::path(
    get,
    path = "/projects/{project_id}/requirements",
    params(("project_id" = i64, Path, description = "Project to list requirements for"), Pagination),
    responses(
        (status = 200, description = "Requirements for the project", body = [RequirementResponse]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Customer role required", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Requirements"
)]
pub async fn list_project_requirements(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    CustomerUser(_user): CustomerUser,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    if state.db.get_project(project_id).await?.is_none() {
        return Err(AppError::NotFound(anyhow::anyhow!("Project not found")));
    }

    let requirements = state
        .db
        .list_requirements_by_project(project_id, pagination.skip(), pagination.limit())
        .await?;

    let requirements: Vec<RequirementResponse> = requirements
        .into_iter()
        .map(RequirementResponse::from)
        .collect();
    Ok(Json(requirements))
}

/// Update a requirement (Owner only, own projects)
#[utoipa::path(
    put,
    path = "/requirements/{requirement_id}",
    params(("requirement_id" = i64, Path, description = "Requirement to update")),
    request_body = UpdateRequirementRequest,
    responses(
        (status = 200, description = "Requirement updated", body = RequirementResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the project owner", body = ErrorResponse),
        (status = 404, description = "Requirement or parent project not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Requirements"
)]
pub async fn update_requirement(
    State(state): State<AppState>,
    Path(requirement_id): Path<i64>,
    OwnerUser(owner): OwnerUser,
    ValidatedJson(req): ValidatedJson<UpdateRequirementRequest>,
) -> Result<impl IntoResponse, AppError> {
    let requirement = state
        .db
        .get_requirement(requirement_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Requirement not found")))?;

    require_requirement_ownership(&state.db, &owner, &requirement).await?;

    let updated = state
        .db
        .update_requirement(requirement_id, req.description.as_deref(), req.kind)
        .await?;

    Ok(Json(RequirementResponse::from(updated)))
}

/// Update a requirement's status (Owner only, own projects)
#[utoipa::path(
    patch,
    path = "/requirements/{requirement_id}/status",
    params(("requirement_id" = i64, Path, description = "Requirement to update")),
    request_body = RequirementStatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = RequirementResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the project owner", body = ErrorResponse),
        (status = 404, description = "Requirement or parent project not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Requirements"
)]
pub async fn update_requirement_status(
    State(state): State<AppState>,
    Path(requirement_id): Path<i64>,
    OwnerUser(owner): OwnerUser,
    Json(req): Json<RequirementStatusUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let requirement = state
        .db
        .get_requirement(requirement_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Requirement not found")))?;

    require_requirement_ownership(&state.db, &owner, &requirement).await?;

    let updated = state
        .db
        .update_requirement_status(requirement_id, req.status)
        .await?;

    Ok(Json(RequirementResponse::from(updated)))
}

/// Delete a requirement (Owner only, own projects)
#[utoipa::path(
    delete,
    path = "/requirements/{requirement_id}",
    params(("requirement_id" = i64, Path, description = "Requirement to delete")),
    responses(
        (status = 204, description = "Requirement deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the project owner", body = ErrorResponse),
        (status = 404, description = "Requirement or parent project not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Requirements"
)]
pub async fn delete_requirement(
    State(state): State<AppState>,
    Path(requirement_id): Path<i64>,
    OwnerUser(owner): OwnerUser,
) -> Result<impl IntoResponse, AppError> {
    let requirement = state
        .db
        .get_requirement(requirement_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Requirement not found")))?;

    require_requirement_ownership(&state.db, &owner, &requirement).await?;

    state.db.delete_requirement(requirement_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
