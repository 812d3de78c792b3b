//! User model - accounts holding one of the two fixed roles.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Role of an account. Exactly two cases with disjoint capabilities;
/// gates match exhaustively so a new role is a compile-time-visible change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Owner,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Customer
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Owner => "owner",
        }
    }
}

/// User entity.
///
/// The auth core only ever reads these rows; they are created at
/// registration and never mutated here.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_values_are_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Owner).unwrap(), "\"owner\"");
        assert_eq!(
            serde_json::to_string(&UserRole::Customer).unwrap(),
            "\"customer\""
        );
        assert_eq!(
            serde_json::from_str::<UserRole>("\"owner\"").unwrap(),
            UserRole::Owner
        );
    }

    #[test]
    fn default_role_is_customer() {
        assert_eq!(UserRole::default(), UserRole::Customer);
    }
}
