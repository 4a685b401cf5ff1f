use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    time: String,
}

/// `GET /health`: always 200; the body says whether the database answers.
pub async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = &app_state.db;
    let probe = Statement::from_string(db.get_database_backend(), "SELECT 1 AS health_check");

    let (db_status, db_error, migrations) = match db.query_one(probe).await {
        Ok(_) => {
            let version = match get_latest_migration_version(db).await {
                Ok(Some(version)) => version,
                Ok(None) => "no_migrations".to_string(),
                Err(_) => "unknown".to_string(),
            };
            ("ok", None, version)
        }
        Err(e) => ("error", Some(format!("DB query failed: {e}")), "unknown".to_string()),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: app_state.app_version,
        db: db_status,
        db_error,
        migrations,
        time: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string()),
    }))
}
