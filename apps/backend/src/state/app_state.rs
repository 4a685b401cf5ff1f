use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Shared, read-only state handed to every worker via `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub security: SecurityConfig,
    pub app_version: &'static str,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db,
            security,
            app_version: env!("CARGO_PKG_VERSION"),
        }
    }
}
