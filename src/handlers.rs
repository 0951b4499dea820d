//! HTTP route handlers for the web application.
//!
//! This module contains the route handlers for the configurator page, the
//! overlay page, and the JSON/WebSocket endpoints the two pages talk to.

use crate::configurator::Debouncer;
use crate::fonts::{FontList, FontManager, FONT_LOAD_FAILED};
use crate::format::OFFLINE_LABEL;
use crate::models::{ConfiguratorForm, ConfiguratorMessage, Notification, WidgetConfig};
use crate::params::parse_query_params;
use crate::templates::{render_configurator, render_overlay};
use crate::uptime::Phase;
use crate::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, RawQuery, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;

// ============================================================================
// Configurator
// ============================================================================

/// GET / - configurator page, pre-filled from the query string.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(form): Query<ConfiguratorForm>,
) -> Html<String> {
    let mut notifications = Vec::new();

    let fonts = match state.fonts.fonts().await {
        Ok(fonts) => fonts,
        Err(e) => {
            tracing::warn!("Error loading fonts: {}", e);
            notifications.push(Notification::danger(FONT_LOAD_FAILED));
            Vec::new()
        }
    };

    let display = match state.display.update_display(&form) {
        Ok(display) => Some(display),
        Err(notification) => {
            notifications.push(notification);
            None
        }
    };

    Html(render_configurator(
        &form,
        &fonts,
        display.as_ref(),
        state.config.debounce_ms,
        &notifications,
    ))
}

/// GET /api/widget - generated URL and CSS for a form state.
pub async fn widget_api(
    State(state): State<Arc<AppState>>,
    Query(form): Query<ConfiguratorForm>,
) -> Json<ConfiguratorMessage> {
    Json(state.display.update_display(&form).into())
}

/// GET /api/fonts - the selectable font families.
pub async fn fonts_api(State(state): State<Arc<AppState>>) -> Response {
    match state.fonts.fonts().await {
        Ok(fonts) => Json(FontList { fonts }).into_response(),
        Err(e) => {
            tracing::warn!("Error loading fonts: {}", e);
            (StatusCode::BAD_GATEWAY, FONT_LOAD_FAILED).into_response()
        }
    }
}

/// GET /ws/configurator - debounced display updates.
///
/// The client sends the serialized form on every input; only the last form
/// of a burst is answered, once the debounce period has passed quietly.
pub async fn configurator_ws(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_configurator_ws(socket, state))
}

async fn handle_configurator_ws(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut debouncer = Debouncer::new(state.config.debounce());

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => match ConfiguratorForm::from_query(text.as_str()) {
                        Ok(form) => debouncer.push(form),
                        Err(e) => tracing::debug!("Ignoring malformed form update: {}", e),
                    },
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
            form = debouncer.ready(), if debouncer.is_pending() => {
                let message: ConfiguratorMessage = state.display.update_display(&form).into();
                let json = match serde_json::to_string(&message) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!("Failed to serialize display update: {}", e);
                        continue;
                    }
                };
                if ws_tx.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    }
}

// ============================================================================
// Overlay
// ============================================================================

/// GET /widget/uptime - the overlay page.
pub async fn overlay_page(RawQuery(query): RawQuery) -> Html<String> {
    let widget = parse_query_params(query.as_deref().unwrap_or(""));
    let font = FontManager::for_family(widget.custom_font());
    Html(render_overlay(OFFLINE_LABEL, font.as_ref()))
}

/// GET /ws/uptime - label stream for one overlay instance.
pub async fn uptime_ws(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    ws: WebSocketUpgrade,
) -> Response {
    let widget = parse_query_params(query.as_deref().unwrap_or(""));
    ws.on_upgrade(move |socket| handle_uptime_ws(socket, state, widget))
}

async fn handle_uptime_ws(socket: WebSocket, state: Arc<AppState>, widget: WidgetConfig) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (label_tx, mut label_rx) = mpsc::channel::<String>(8);

    tracing::info!(platform = %widget.platform, username = %widget.username, "overlay connected");

    // Dropping the driver future tears down its timers with it.
    let driver = state.uptime_manager(widget).run(label_tx);
    tokio::pin!(driver);

    loop {
        tokio::select! {
            _ = &mut driver => break,
            label = label_rx.recv() => {
                match label {
                    Some(label) => {
                        if ws_tx.send(Message::Text(label.into())).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::info!("overlay disconnected");
}

#[derive(Debug, Serialize)]
pub struct UptimeSnapshot {
    pub phase: Phase,
    pub label: String,
    pub started_at: Option<DateTime<Utc>>,
}

/// GET /api/uptime - poll once and report, without keeping timers.
pub async fn uptime_api(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<UptimeSnapshot> {
    let widget = parse_query_params(query.as_deref().unwrap_or(""));
    let mut manager = state.uptime_manager(widget);
    manager.fetch_uptime().await;

    let machine = manager.machine();
    Json(UptimeSnapshot {
        phase: machine.phase(),
        label: manager.label(),
        started_at: machine.stream_start(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(AppConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_overlay_page_loads_requested_font() {
        let Html(html) = overlay_page(RawQuery(Some("platform=kick&fontFamily=Lato".to_string()))).await;
        assert!(html.contains("family=Lato:wght@"));
        assert!(html.contains(r#"<div id="uptimeLabel">Offline</div>"#));
    }

    #[tokio::test]
    async fn test_overlay_page_without_query() {
        let Html(html) = overlay_page(RawQuery(None)).await;
        assert!(!html.contains("fonts.googleapis.com"));
    }

    #[tokio::test]
    async fn test_widget_api_builds_url() {
        let form = ConfiguratorForm {
            platform: Some("kick".to_string()),
            username: Some("foo".to_string()),
            hide_seconds: Some("true".to_string()),
            ..Default::default()
        };
        let Json(message) = widget_api(State(state()), Query(form)).await;
        match message {
            ConfiguratorMessage::Display(display) => {
                assert_eq!(
                    display.url,
                    "http://127.0.0.1:3000/widget/uptime?platform=kick&username=foo&format=short&hideSeconds=true"
                );
                assert_eq!(display.css, "");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_uptime_api_skips_unknown_platform() {
        let Json(snapshot) =
            uptime_api(State(state()), RawQuery(Some("platform=youtube&username=x".to_string())))
                .await;
        assert_eq!(snapshot.phase, Phase::Unknown);
        assert_eq!(snapshot.label, "Offline");
        assert_eq!(snapshot.started_at, None);
    }

    async fn state_with_broken_fonts() -> Arc<AppState> {
        use axum::routing::get;

        let router = axum::Router::new().route(
            "/fonts.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = crate::test_support::serve(router).await;
        let config = AppConfig {
            font_list_url: format!("{}/fonts.json", base),
            ..AppConfig::default()
        };
        Arc::new(AppState::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_fonts_api_reports_bad_gateway() {
        let response = fonts_api(State(state_with_broken_fonts().await)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_index_warns_when_fonts_fail() {
        let Html(html) = index(
            State(state_with_broken_fonts().await),
            Query(ConfiguratorForm::default()),
        )
        .await;
        assert!(html.contains("alert-danger"));
        assert!(html.contains(FONT_LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_fonts_api_serves_list() {
        use axum::routing::get;

        let router = axum::Router::new().route(
            "/fonts.json",
            get(|| async { Json(FontList { fonts: vec!["Lato".to_string()] }) }),
        );
        let base = crate::test_support::serve(router).await;
        let state = Arc::new(
            AppState::new(AppConfig {
                font_list_url: format!("{}/fonts.json", base),
                ..AppConfig::default()
            })
            .unwrap(),
        );

        let response = fonts_api(State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.fonts.fonts().await.unwrap(), vec!["Lato"]);
    }
}
