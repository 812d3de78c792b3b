//! Database service for reqwise-service.

use sqlx::postgres::PgPool;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::{Project, Requirement, RequirementStatus, RequirementType, User, UserRole};

/// Database connection pool wrapper.
///
/// Each method is its own transaction; callers never batch, cache or lock
/// on top of it.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // User Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create a user. The password arrives already hashed; plaintext never
    /// reaches this layer.
    #[instrument(skip(self, password_hash), fields(username = %username))]
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, role
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!("Username or email already registered"))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create user: {}", e)),
        })?;

        info!(user_id = %user.id, role = %user.role.as_str(), "User created");

        Ok(user)
    }

    // -------------------------------------------------------------------------
    // Project Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, description), fields(owner_id = %owner_id))]
    pub async fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
        owner_id: i64,
    ) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, owner_id
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        info!(project_id = %project.id, "Project created");

        Ok(project)
    }

    #[instrument(skip(self))]
    pub async fn get_project(&self, project_id: i64) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, name, description, owner_id FROM projects WHERE id = $1",
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    #[instrument(skip(self))]
    pub async fn list_projects_by_owner(
        &self,
        owner_id: i64,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id FROM projects
            WHERE owner_id = $1
            ORDER BY id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(owner_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    #[instrument(skip(self))]
    pub async fn list_all_projects(&self, skip: i64, limit: i64) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id FROM projects
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    // -------------------------------------------------------------------------
    // Requirement Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, description), fields(project_id = %project_id))]
    pub async fn create_requirement(
        &self,
        description: &str,
        kind: RequirementType,
        project_id: i64,
    ) -> Result<Requirement, AppError> {
        let requirement = sqlx::query_as::<_, Requirement>(
            r#"
            INSERT INTO requirements (description, kind, project_id)
            VALUES ($1, $2, $3)
            RETURNING id, description, kind, status, project_id
            "#,
        )
        .bind(description)
        .bind(kind)
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        info!(requirement_id = %requirement.id, "Requirement created");

        Ok(requirement)
    }

    #[instrument(skip(self))]
    pub async fn get_requirement(
        &self,
        requirement_id: i64,
    ) -> Result<Option<Requirement>, AppError> {
        let requirement = sqlx::query_as::<_, Requirement>(
            "SELECT id, description, kind, status, project_id FROM requirements WHERE id = $1",
        )
        .bind(requirement_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(requirement)
    }

    /// Update a requirement's description and/or type; omitted fields keep
    /// their stored value.
    #[instrument(skip(self, description))]
    pub async fn update_requirement(
        &self,
        requirement_id: i64,
        description: Option<&str>,
        kind: Option<RequirementType>,
    ) -> Result<Requirement, AppError> {
        let requirement = sqlx::query_as::<_, Requirement>(
            r#"
            UPDATE requirements
            SET description = COALESCE($2, description),
                kind = COALESCE($3, kind)
            WHERE id = $1
            RETURNING id, description, kind, status, project_id
            "#,
        )
        .bind(requirement_id)
        .bind(description)
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;

        Ok(requirement)
    }

    #[instrument(skip(self))]
    pub async fn update_requirement_status(
        &self,
        requirement_id: i64,
        status: RequirementStatus,
    ) -> Result<Requirement, AppError> {
        let requirement = sqlx::query_as::<_, Requirement>(
            r#"
            UPDATE requirements
            SET status = $2
            WHERE id = $1
            RETURNING id, description, kind, status, project_id
            "#,
        )
        .bind(requirement_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(requirement)
    }

    #[instrument(skip(self))]
    pub async fn delete_requirement(&self, requirement_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM requirements WHERE id = $1")
            .bind(requirement_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    pub async fn list_requirements_by_project(
        &self,
        project_id: i64,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Requirement>, AppError> {
        let requirements = sqlx::query_as::<_, Requirement>(
            r#"
            SELECT id, description, kind, status, project_id FROM requirements
            WHERE project_id = $1
            ORDER BY id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(project_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(requirements)
    }
}
