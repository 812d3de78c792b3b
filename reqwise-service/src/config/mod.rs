use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct ReqwiseConfig {
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(format!("Unknown environment '{}', expected 'dev' or 'prod'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret. The process refuses to start without it.
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub login_attempts: u32,
    pub login_window_seconds: u64,
    pub register_attempts: u32,
    pub register_window_seconds: u64,
    pub global_ip_limit: u32,
    pub global_ip_window_seconds: u64,
}

impl ReqwiseConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let environment: Environment = get_env("ENVIRONMENT", Some("dev"))?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        Ok(ReqwiseConfig {
            environment,
            service_name: get_env("SERVICE_NAME", Some("reqwise-service"))?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")))?,
            log_level: get_env("LOG_LEVEL", Some("info"))?,
            port: parse_env("PORT", Some("8080"))?,
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", None)?,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", Some("10"))?,
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS", Some("1"))?,
            },
            auth: AuthConfig {
                secret_key: get_env("SECRET_KEY", None)?,
                access_token_expire_minutes: parse_env("ACCESS_TOKEN_EXPIRE_MINUTES", Some("30"))?,
            },
            security: SecurityConfig {
                allowed_origins: get_env("ALLOWED_ORIGINS", Some("http://localhost:3000"))?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            rate_limit: RateLimitConfig {
                login_attempts: parse_env("RATE_LIMIT_LOGIN_ATTEMPTS", Some("5"))?,
                login_window_seconds: parse_env("RATE_LIMIT_LOGIN_WINDOW_SECONDS", Some("60"))?,
                register_attempts: parse_env("RATE_LIMIT_REGISTER_ATTEMPTS", Some("5"))?,
                register_window_seconds: parse_env("RATE_LIMIT_REGISTER_WINDOW_SECONDS", Some("60"))?,
                global_ip_limit: parse_env("RATE_LIMIT_GLOBAL_IP_LIMIT", Some("100"))?,
                global_ip_window_seconds: parse_env("RATE_LIMIT_GLOBAL_IP_WINDOW_SECONDS", Some("60"))?,
            },
        })
    }
}

/// Read an environment variable, falling back to `default` when unset.
/// A `None` default marks the variable as required.
fn get_env(name: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => match default {
            Some(value) => Ok(value.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} environment variable not set",
                name
            ))),
        },
    }
}

fn parse_env<T>(name: &str, default: Option<&str>) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env(name, default)?.parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("Invalid value for {}: {}", name, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_known_values() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Prod);
        assert!("staging".parse::<Environment>().is_err());
    }
}
