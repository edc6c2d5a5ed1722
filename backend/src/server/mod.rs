//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{
    BuildMode, DEFAULT_PORT, SECRET_MIN_LEN, ServerConfigError, ServerSettings,
    server_settings_from_env,
};
pub use state_builders::{StartupError, build_http_state, build_user_repository};

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::Trace;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::{HttpState, graphql_resource};

/// Shared per-worker dependencies.
#[derive(Clone)]
pub struct AppDependencies {
    /// Probe flags.
    pub health_state: web::Data<HealthState>,
    /// GraphQL schema and context factory.
    pub http_state: web::Data<HttpState>,
}

/// Assemble the application: trace middleware, `/graphql`, and health probes.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(graphql_resource())
        .service(ready)
        .service(live)
}

/// Bind an Actix HTTP server and mark the health state ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
