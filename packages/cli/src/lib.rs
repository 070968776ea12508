// ABOUTME: Server entry point wiring configuration, logging and the HTTP API
// ABOUTME: Builds the middleware stack and serves the todo router

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod cli;
pub mod config;
pub mod logging;
pub mod middleware;


use config::Config;
use todo_api::DbState;

/// Build the application router with CORS, tracing and panic handling layers
pub fn build_app(config: &Config, db: DbState) -> anyhow::Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(todo_api::create_router(db)
        .layer(middleware::create_panic_handler())
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let db = DbState::init(&config.database())
        .await
        .context("Failed to initialize database")?;

    let app = build_app(&config, db)?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}", addr);
    info!("CORS origin: {}", config.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
