//! feedql entry point: loads settings, prepares the user store, and serves
//! `/graphql` plus health probes.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use feedql::inbound::http::HealthState;
use feedql::server::{BuildMode, build_http_state, create_server, server_settings_from_env};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = server_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid server configuration")?;
    let http_state = build_http_state(&settings)
        .await
        .wrap_err("failed to prepare user store")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), http_state, settings.bind_addr)
        .wrap_err_with(|| format!("failed to bind {}", settings.bind_addr))?;
    info!(
        addr = %settings.bind_addr,
        "server is running on http://{}/graphql",
        settings.bind_addr
    );

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated with an error")
}
