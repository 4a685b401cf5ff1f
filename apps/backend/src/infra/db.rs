use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::logging::pii::Redacted;

/// Open a pool for the given profile. Does not run migrations.
pub async fn connect_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(profile.url().to_string());
    opts.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    // Each in-memory SQLite connection is its own database.
    if matches!(profile, DbProfile::InMemory) {
        opts.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opts).await?;
    info!(db = %Redacted(profile.url()), backend = ?conn.get_database_backend(), "db_connected");
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}
