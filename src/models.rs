//! Data models for the uptime widget.
//!
//! This module contains the core data structures shared by the configurator
//! and the overlay: the decoded widget configuration, the configurator form,
//! and the display results sent back to the browser.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Widget Configuration
// ============================================================================

/// Streaming platform an overlay polls.
///
/// Unrecognized names are kept verbatim; fetching for them is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    #[default]
    Twitch,
    Kick,
    Other(String),
}

impl Platform {
    /// Absent or empty values fall back to Twitch.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some("twitch") => Platform::Twitch,
            Some("kick") => Platform::Kick,
            Some(other) => Platform::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Platform::Twitch => "twitch",
            Platform::Kick => "kick",
            Platform::Other(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Platform::Other(_))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Short,
    Long,
}

impl Format {
    /// Only an exact `long` selects the long format.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("long") => Format::Long,
            _ => Format::Short,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Short => "short",
            Format::Long => "long",
        }
    }
}

/// Overlay configuration as carried by the widget URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetConfig {
    pub platform: Platform,
    pub username: String,
    pub prefix: String,
    pub format: Format,
    pub hide_seconds: bool,
    pub font_family: Option<String>,
}

impl WidgetConfig {
    /// Font family to load, ignoring an empty value.
    pub fn custom_font(&self) -> Option<&str> {
        self.font_family.as_deref().filter(|f| !f.is_empty())
    }
}

// ============================================================================
// Configurator Form
// ============================================================================

/// Raw configurator form state, as submitted by the browser.
///
/// Field names match the HTML form inputs. Checkboxes arrive as `on` (or
/// `true` from the live preview script) and are absent when unchecked.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfiguratorForm {
    pub platform: Option<String>,
    pub username: Option<String>,
    pub prefix: Option<String>,
    pub format: Option<String>,
    pub hide_seconds: Option<String>,
    pub font_family: Option<String>,
    pub custom_styling: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub color: Option<String>,
    pub letter_spacing: Option<String>,
    pub text_transform: Option<String>,
    pub text_shadow: Option<String>,
}

pub fn is_checked(value: Option<&str>) -> bool {
    matches!(value, Some("on") | Some("true"))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

impl ConfiguratorForm {
    /// Parse a serialized form (`URLSearchParams` string). The first
    /// occurrence of a repeated field wins.
    pub fn from_query(query: &str) -> Result<Self, serde_json::Error> {
        let mut fields = serde_json::Map::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            fields
                .entry(key.into_owned())
                .or_insert_with(|| serde_json::Value::String(value.into_owned()));
        }
        serde_json::from_value(serde_json::Value::Object(fields))
    }

    pub fn widget_config(&self) -> WidgetConfig {
        WidgetConfig {
            platform: Platform::from_param(self.platform.as_deref()),
            username: self.username.clone().unwrap_or_default(),
            prefix: self.prefix.clone().unwrap_or_default(),
            format: Format::from_param(self.format.as_deref()),
            hide_seconds: is_checked(self.hide_seconds.as_deref()),
            font_family: non_empty(&self.font_family),
        }
    }

    pub fn style_form(&self) -> StyleForm {
        StyleForm {
            custom_styling: is_checked(self.custom_styling.as_deref()),
            font_size: non_empty(&self.font_size),
            font_weight: non_empty(&self.font_weight),
            color: non_empty(&self.color),
            letter_spacing: non_empty(&self.letter_spacing),
            text_transform: non_empty(&self.text_transform),
            text_shadow: non_empty(&self.text_shadow),
        }
    }
}

/// Styling section of the configurator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleForm {
    pub custom_styling: bool,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub color: Option<String>,
    pub letter_spacing: Option<String>,
    pub text_transform: Option<String>,
    pub text_shadow: Option<String>,
}

// ============================================================================
// Display Results
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetDisplay {
    pub url: String,
    pub css: String,
    pub show_result: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Danger,
    Warning,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Danger => "danger",
            NotificationLevel::Warning => "warning",
        }
    }
}

/// Transient message shown in the corner of the configurator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Danger,
        }
    }
}

/// Reply to a configurator update, tagged by `type` for the page script.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConfiguratorMessage {
    Display(WidgetDisplay),
    Notification(Notification),
}

impl From<Result<WidgetDisplay, Notification>> for ConfiguratorMessage {
    fn from(result: Result<WidgetDisplay, Notification>) -> Self {
        match result {
            Ok(display) => ConfiguratorMessage::Display(display),
            Err(notification) => ConfiguratorMessage::Notification(notification),
        }
    }
}
