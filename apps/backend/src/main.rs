use actix_web::{web, App, HttpServer};
use social_backend::config::db::DbProfile;
use social_backend::config::server::ServerConfig;
use social_backend::infra::state::build_state;
use social_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use social_backend::{routes, telemetry};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from the process environment only and is frozen
    // once the state is built.
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid_configuration");
            std::process::exit(1);
        }
    };
    let db_profile = match DbProfile::from_env() {
        Ok(profile) => profile,
        Err(e) => {
            error!(error = %e, "invalid_configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state(config.security.clone())
        .with_db(db_profile)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "state_build_failed");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "server_starting");

    let data = web::Data::new(app_state);

    // Last wrap runs first: RequestTrace, then TraceSpan, then StructuredLogger.
    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
