//! Requirement model - requirements hang off a project and are reached
//! through it for every ownership decision.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "requirement_type", rename_all = "snake_case")]
pub enum RequirementType {
    MustHave,
    NiceToHave,
}

impl Default for RequirementType {
    fn default() -> Self {
        RequirementType::MustHave
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "requirement_status", rename_all = "snake_case")]
pub enum RequirementStatus {
    Pending,
    InProgress,
    Done,
}

impl Default for RequirementStatus {
    fn default() -> Self {
        RequirementStatus::Pending
    }
}

/// Requirement entity. Carries no owner field: ownership is resolved by
/// walking `project_id` up to the project at check time.
#[derive(Debug, Clone, FromRow)]
pub struct Requirement {
    pub id: i64,
    pub description: String,
    pub kind: RequirementType,
    pub status: RequirementStatus,
    pub project_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&RequirementStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<RequirementStatus>("\"pending\"").unwrap(),
            RequirementStatus::Pending
        );
    }

    #[test]
    fn type_wire_values_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&RequirementType::NiceToHave).unwrap(),
            "\"nice_to_have\""
        );
        assert_eq!(
            serde_json::from_str::<RequirementType>("\"must_have\"").unwrap(),
            RequirementType::MustHave
        );
    }
}
