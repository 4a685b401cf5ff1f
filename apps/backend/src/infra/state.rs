use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the integration tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: DbProfile,
}

impl StateBuilder {
    pub fn new(security_config: SecurityConfig) -> Self {
        Self {
            security_config,
            db_profile: DbProfile::InMemory,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let conn = bootstrap_db(&self.db_profile).await?;
        Ok(AppState::new(conn, self.security_config))
    }
}

pub fn build_state(security_config: SecurityConfig) -> StateBuilder {
    StateBuilder::new(security_config)
}
