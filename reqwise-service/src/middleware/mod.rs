pub mod auth;
pub mod metrics;
pub mod rate_limit;
pub mod security_headers;
pub mod tracing;

pub use auth::{auth_middleware, AuthUser, CustomerUser, OwnerUser};
pub use rate_limit::{create_ip_rate_limiter, ip_rate_limit_middleware, IpRateLimiter};
