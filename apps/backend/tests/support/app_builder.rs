use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use social_backend::error::AppError;
use social_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use social_backend::routes;
use social_backend::state::app_state::AppState;

type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig)>;

/// Builds an Actix test service with the same middleware stack as `main`.
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Mount the production route table.
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure));
        self
    }

    /// Mount ad-hoc routes instead of the production table.
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + 'static,
    {
        self.route_config = Some(Box::new(config_fn));
        self
    }

    pub async fn build(
        self,
    ) -> Result<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>, AppError>
    {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        let service = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await;

        Ok(service)
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
