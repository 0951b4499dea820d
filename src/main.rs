//! Stream uptime widget - configurator and overlay server.
//!
//! This is the main entry point for the widget web server.
//! The application is organized into the following modules:
//!
//! - `models`: Widget configuration, configurator form and display results
//! - `params`: The overlay query-string contract
//! - `format`: Elapsed-time formatting
//! - `uptime`: Platform polling and the uptime state machine
//! - `css` / `configurator` / `fonts`: Configurator output
//! - `templates`: HTML/CSS/JS templates and rendering
//! - `handlers`: HTTP and WebSocket route handlers

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use uptime_widget::{handlers, load_config, AppState};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config().expect("Failed to load configuration");
    let state = Arc::new(AppState::new(config.clone()).expect("Failed to build HTTP client"));

    let app = Router::new()
        // Configurator routes
        .route("/", get(handlers::index))
        .route("/api/widget", get(handlers::widget_api))
        .route("/api/fonts", get(handlers::fonts_api))
        .route("/ws/configurator", get(handlers::configurator_ws))
        // Overlay routes
        .route("/widget/uptime", get(handlers::overlay_page))
        .route("/ws/uptime", get(handlers::uptime_ws))
        .route("/api/uptime", get(handlers::uptime_api))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", config.bind, e));

    tracing::info!("Uptime widget running at http://{}", config.bind);
    tracing::info!("Widget URLs generated under {}", config.public_url);
    tracing::info!(
        retry_ms = config.retry_interval_ms,
        render_ms = config.render_interval_ms,
        "Uptime polling configured"
    );

    axum::serve(listener, app).await.expect("Server error");
}
