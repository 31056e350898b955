//! # Inkpost API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;

use config::AppConfig;
use inkpost_core::ports::{PasswordService, TokenService};
use inkpost_infra::auth::{BcryptPasswordService, JwtConfig, JwtTokenService};
use state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration; a missing SESSION_SECRET aborts before binding.
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("{}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    tracing::info!(
        "Starting Inkpost API server on {}:{}",
        config.host,
        config.port
    );

    // Build application state and auth services
    let state = AppState::new(config.database.as_ref()).await;
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig::new(
        config.session_secret.clone(),
    )));
    let password_service: Arc<dyn PasswordService> = Arc::new(BcryptPasswordService::default());

    let bind_addr = (config.host.clone(), config.port);
    let config = web::Data::new(config);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .app_data(config.clone())
            .configure(handlers::configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,inkpost_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
