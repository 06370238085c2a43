// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::entry_session::SessionRegistry;
use crate::application::report_service::ReportService;
use crate::domain::scoring::StandardScorer;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_backend::HttpBackend;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_dashboard_config()?;
    let timeout = config.backend.timeout();

    // Create backend client (infrastructure layer)
    let api = Arc::new(HttpBackend::new(
        config.backend.base_url.clone(),
        config.backend.auth_token,
        timeout,
    )?);

    // Create services (application layer)
    let report_service = ReportService::new(api.clone(), Arc::new(StandardScorer));
    let sessions = Arc::new(SessionRegistry::new(
        report_service.clone(),
        timeout,
        config.server.max_sessions,
    ));

    // Create application state
    let state = Arc::new(AppState {
        api,
        report_service,
        sessions,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(
        "Starting air-quality-dashboard on {} (backend {})",
        addr,
        config.backend.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
