pub mod authz;
pub mod database;
pub mod jwt;
pub mod metrics;

pub use authz::{require_project_ownership, require_requirement_ownership};
pub use database::Database;
pub use jwt::{AccessTokenClaims, JwtService};
