use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = get("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("BACKEND_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("BACKEND_PORT is not a valid port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        let secret = get("BACKEND_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set"))?;

        let ttl = match get("BACKEND_TOKEN_TTL_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "BACKEND_TOKEN_TTL_SECS must be a positive integer, got: {raw}"
                    )))
                }
            },
            None => DEFAULT_TOKEN_TTL,
        };

        Ok(Self {
            host,
            port,
            security: SecurityConfig::new(secret.into_bytes()).with_token_ttl(ttl),
        })
    }
}
