//! Ownership checks for projects and requirements.
//!
//! Ownership is decided by walking the live relationship at request time:
//! requirement -> project -> owner. The child row carries no owner field,
//! so a check always reflects the requirement's current project assignment.

use crate::error::AppError;
use crate::models::{Project, Requirement, User};
use crate::services::Database;

/// Require that `user` owns `project`.
pub fn require_project_ownership(user: &User, project: &Project) -> Result<(), AppError> {
    if project.owner_id != user.id {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Not authorized to access this project"
        )));
    }
    Ok(())
}

/// Require that `user` owns the project a requirement belongs to.
///
/// Resolves the parent project through the store on every call. A
/// requirement whose project has vanished is a data-integrity case and
/// surfaces as `NotFound`, not `Forbidden`.
pub async fn require_requirement_ownership(
    db: &Database,
    user: &User,
    requirement: &Requirement,
) -> Result<Project, AppError> {
    let project = db
        .get_project(requirement.project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Project not found")))?;

    if project.owner_id != user.id {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Not authorized to modify this requirement"
        )));
    }

    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn owner(id: i64) -> User {
        User {
            id,
            username: format!("owner{}", id),
            email: format!("owner{}@example.com", id),
            password_hash: "$argon2id$irrelevant".to_string(),
            role: UserRole::Owner,
        }
    }

    fn project(id: i64, owner_id: i64) -> Project {
        Project {
            id,
            name: "Test project".to_string(),
            description: None,
            owner_id,
        }
    }

    #[test]
    fn owner_passes_project_check() {
        let alice = owner(1);
        assert!(require_project_ownership(&alice, &project(10, 1)).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let carol = owner(2);
        let err = require_project_ownership(&carol, &project(10, 1)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
