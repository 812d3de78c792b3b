pub mod projects;
pub mod requirements;
pub mod users;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Could not validate credentials")]
    pub error: String,
}

/// Offset pagination shared by the list endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Number of items to skip.
    pub skip: Option<i64>,
    /// Maximum number of items to return (1-100).
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(100).clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        let p = Pagination {
            skip: None,
            limit: None,
        };
        assert_eq!(p.skip(), 0);
        assert_eq!(p.limit(), 100);

        let p = Pagination {
            skip: Some(-5),
            limit: Some(1000),
        };
        assert_eq!(p.skip(), 0);
        assert_eq!(p.limit(), 100);

        let p = Pagination {
            skip: Some(20),
            limit: Some(0),
        };
        assert_eq!(p.skip(), 20);
        assert_eq!(p.limit(), 1);
    }
}
