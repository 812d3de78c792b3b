//! Project model - each project belongs to exactly one Owner account.

use sqlx::FromRow;

/// Project entity.
///
/// `owner_id` is the ownership edge the authorization gates walk; it is
/// never copied onto child requirements.
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
}
