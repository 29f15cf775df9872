//! # Journal API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Journal API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to build application state");
        std::io::Error::other(e.to_string())
    })?;

    HttpServer::new(move || {
        let ai_limiter = state.ai_limiter.clone();
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, ai_limiter))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
