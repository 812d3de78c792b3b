use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Requirement, RequirementStatus, RequirementType};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequirementRequest {
    #[validate(length(min = 5, message = "Description must be at least 5 characters"))]
    #[schema(example = "Login page renders within 200ms")]
    pub description: String,

    /// Type of the requirement. Defaults to must_have.
    #[serde(default, rename = "type")]
    pub kind: RequirementType,
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRequirementRequest {
    #[validate(length(min = 5, message = "Description must be at least 5 characters"))]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<RequirementType>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RequirementStatusUpdate {
    pub status: RequirementStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RequirementResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: RequirementType,
    pub status: RequirementStatus,
    /// ID of the project this requirement belongs to.
    #[schema(example = 1)]
    pub project_id: i64,
}

impl From<Requirement> for RequirementResponse {
    fn from(requirement: Requirement) -> Self {
        Self {
            id: requirement.id,
            description: requirement.description,
            kind: requirement.kind,
            status: requirement.status,
            project_id: requirement.project_id,
        }
    }
}
