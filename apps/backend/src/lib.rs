#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

pub use auth::{mint_access_token, verify_access_token, AuthError, Claims};
pub use config::db::DbProfile;
pub use config::server::ServerConfig;
pub use error::AppError;
pub use extractors::current_user::CurrentUser;
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{JwtExtract, RequestTrace, StructuredLogger, TraceSpan};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
