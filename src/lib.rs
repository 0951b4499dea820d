//! Uptime widget library - re-exports for testing and external use.
//!
//! This module provides public access to all the application's modules
//! for testing purposes and potential library use.

use std::sync::Arc;

pub mod config;
pub mod configurator;
pub mod css;
pub mod fonts;
pub mod format;
pub mod handlers;
pub mod models;
pub mod params;
pub mod templates;
pub mod uptime;

use config::AppConfig;
use configurator::WidgetDisplayManager;
use fonts::FontCatalog;
use models::WidgetConfig;
use uptime::{HttpUptimeSource, UptimeDisplayManager};

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub config: AppConfig,
    pub http: reqwest::Client,
    pub fonts: FontCatalog,
    pub display: WidgetDisplayManager,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            fonts: FontCatalog::new(http.clone(), config.font_list_url.clone()),
            display: WidgetDisplayManager::new(config.public_url.clone()),
            http,
            config,
        })
    }

    pub fn uptime_source(&self) -> HttpUptimeSource {
        HttpUptimeSource::new(self.http.clone(), &self.config)
    }

    /// A fresh display manager for one overlay instance.
    pub fn uptime_manager(&self, widget: WidgetConfig) -> UptimeDisplayManager<HttpUptimeSource> {
        UptimeDisplayManager::new(
            widget,
            self.uptime_source(),
            self.config.retry_interval(),
            self.config.render_interval(),
        )
    }
}

pub type SharedState = Arc<AppState>;

// Re-export commonly used types
pub use config::load_config;
pub use configurator::{Debouncer, SettingsManager, WidgetUrlGenerator};
pub use css::{generate_css, style_overrides, StyleOverrides};
pub use fonts::{FontError, FontList, FontManager};
pub use format::{format_uptime, live_label, Elapsed, OFFLINE_LABEL};
pub use models::{
    ConfiguratorForm, ConfiguratorMessage, Format, Notification, NotificationLevel, Platform,
    StyleForm, WidgetDisplay,
};
pub use params::{encode_query_params, parse_query_params};
pub use uptime::{Phase, StreamStatus, UptimeError, UptimeMachine, UptimeSource};

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;

    /// Serve `router` on an ephemeral local port and return its base URL.
    pub async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}", addr)
    }
}
