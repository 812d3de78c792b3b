use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Project;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectRequest {
    #[validate(length(min = 3, max = 100, message = "Project name must be 3-100 characters"))]
    #[schema(example = "Website relaunch")]
    pub name: String,

    #[schema(example = "Customer-facing site, phase two")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// ID of the user who owns this project.
    #[schema(example = 1)]
    pub owner_id: i64,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            owner_id: project.owner_id,
        }
    }
}
