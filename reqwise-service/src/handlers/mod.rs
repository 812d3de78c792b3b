pub mod metrics;
pub mod projects;
pub mod requirements;
pub mod users;
