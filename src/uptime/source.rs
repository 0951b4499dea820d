//! Platform uptime endpoints.
//!
//! Twitch is queried through a text endpoint that answers with an
//! elapsed-time phrase; Kick through its livestream JSON API, which carries
//! the stream's creation timestamp.

use crate::config::AppConfig;
use crate::models::{Platform, WidgetConfig};
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UptimeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed livestream JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unrecognized timestamp {0:?}")]
    Timestamp(String),
    #[error("no uptime endpoint for platform {0:?}")]
    UnsupportedPlatform(String),
}

/// Result of one successful poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    Live(DateTime<Utc>),
    Offline,
}

/// Anything that can report when a channel's stream started.
pub trait UptimeSource: Send + Sync {
    fn fetch(
        &self,
        config: &WidgetConfig,
    ) -> impl Future<Output = Result<StreamStatus, UptimeError>> + Send;
}

// ============================================================================
// Response Parsing
// ============================================================================

/// Extract `<H> hours, <M> minutes, <S> seconds` from a Twitch uptime reply
/// and return the total in seconds.
pub fn parse_twitch_elapsed(body: &str) -> Option<u64> {
    let re = Regex::new(r"(\d+) hours, (\d+) minutes, (\d+) seconds").ok()?;
    let caps = re.captures(body)?;

    let hours: u64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Start time implied by a Twitch uptime reply received at `now`.
pub fn twitch_start_time(body: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(parse_twitch_elapsed(body)?).ok()?;
    now.checked_sub_signed(chrono::Duration::try_seconds(secs)?)
}

#[derive(Debug, Deserialize)]
struct KickLivestream {
    data: Option<KickStream>,
}

#[derive(Debug, Deserialize)]
struct KickStream {
    created_at: Option<String>,
}

/// Accepts RFC 3339 and Kick's bare `YYYY-MM-DD HH:MM:SS` (taken as UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, UptimeError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| UptimeError::Timestamp(value.to_string()))
}

pub fn parse_kick_livestream(body: &str) -> Result<StreamStatus, UptimeError> {
    let livestream: KickLivestream = serde_json::from_str(body)?;

    match livestream.data.and_then(|stream| stream.created_at) {
        Some(created_at) => Ok(StreamStatus::Live(parse_timestamp(&created_at)?)),
        None => Ok(StreamStatus::Offline),
    }
}

// ============================================================================
// HTTP Source
// ============================================================================

/// Polls the real platform endpoints over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUptimeSource {
    client: reqwest::Client,
    twitch_endpoint: String,
    kick_endpoint: String,
}

impl HttpUptimeSource {
    pub fn new(client: reqwest::Client, config: &AppConfig) -> Self {
        Self {
            client,
            twitch_endpoint: config.twitch_endpoint.clone(),
            kick_endpoint: config.kick_endpoint.clone(),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, UptimeError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UptimeError::Status(status));
        }
        Ok(response.text().await?)
    }
}

pub fn endpoint_url(template: &str, username: &str) -> String {
    template.replace("{username}", &urlencoding::encode(username))
}

impl UptimeSource for HttpUptimeSource {
    async fn fetch(&self, config: &WidgetConfig) -> Result<StreamStatus, UptimeError> {
        match &config.platform {
            Platform::Twitch => {
                let body = self
                    .get_text(&endpoint_url(&self.twitch_endpoint, &config.username))
                    .await?;
                Ok(match twitch_start_time(&body, Utc::now()) {
                    Some(start) => StreamStatus::Live(start),
                    None => StreamStatus::Offline,
                })
            }
            Platform::Kick => {
                let body = self
                    .get_text(&endpoint_url(&self.kick_endpoint, &config.username))
                    .await?;
                parse_kick_livestream(&body)
            }
            Platform::Other(name) => Err(UptimeError::UnsupportedPlatform(name.clone())),
        }
    }
}
