//! Server configuration.
//!
//! Values come from built-in defaults overridden by `UPTIME_*` environment
//! variables (e.g. `UPTIME_BIND=0.0.0.0:8080`).

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_PREFIX: &str = "UPTIME_";

pub const TWITCH_ENDPOINT: &str = "https://decapi.me/twitch/uptime/{username}";
pub const KICK_ENDPOINT: &str = "https://kick.com/api/v2/channels/{username}/livestream";
pub const FONT_LIST_URL: &str = "https://gist.githubusercontent.com/blushell/cf1e432b65f5c3a3eb1e30508fb584a4/raw/59f99da9d53aac79da742ebca7aab7121dca66cf/fonts.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    pub bind: String,
    /// Externally visible origin used when generating overlay URLs.
    pub public_url: String,
    pub retry_interval_ms: u64,
    pub render_interval_ms: u64,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
    /// Endpoint templates; `{username}` is replaced with the encoded channel name.
    pub twitch_endpoint: String,
    pub kick_endpoint: String,
    pub font_list_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            public_url: "http://127.0.0.1:3000".to_string(),
            retry_interval_ms: 3000,
            render_interval_ms: 1000,
            debounce_ms: 300,
            request_timeout_secs: 10,
            twitch_endpoint: TWITCH_ENDPOINT.to_string(),
            kick_endpoint: KICK_ENDPOINT.to_string(),
            font_list_url: FONT_LIST_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn figment() -> Figment {
    Figment::from(Serialized::defaults(AppConfig::default())).merge(Env::prefixed(ENV_PREFIX))
}

pub fn load_config() -> Result<AppConfig, figment::Error> {
    figment().extract()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        figment::Jail::expect_with(|_jail| {
            let config = load_config()?;
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.retry_interval(), Duration::from_millis(3000));
            assert_eq!(config.render_interval(), Duration::from_secs(1));
            assert_eq!(config.debounce(), Duration::from_millis(300));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("UPTIME_BIND", "0.0.0.0:8080");
            jail.set_env("UPTIME_RETRY_INTERVAL_MS", "5000");
            let config = load_config()?;
            assert_eq!(config.bind, "0.0.0.0:8080");
            assert_eq!(config.retry_interval_ms, 5000);
            assert_eq!(config.render_interval_ms, 1000);
            Ok(())
        });
    }
}
