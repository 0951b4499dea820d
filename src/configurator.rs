//! Configurator logic: widget URL generation, section visibility, display
//! updates and input debouncing.

use crate::css::generate_css;
use crate::models::{ConfiguratorForm, Notification, WidgetConfig, WidgetDisplay};
use crate::params::encode_query_params;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use url::Url;

/// Overlay page path, relative to the public URL.
pub const WIDGET_PATH: &str = "widget/uptime";

// ============================================================================
// URL Generation
// ============================================================================

#[derive(Debug, Clone)]
pub struct WidgetUrlGenerator {
    base_url: Url,
}

impl WidgetUrlGenerator {
    pub fn new(public_url: &str) -> Result<Self, url::ParseError> {
        let mut root = Url::parse(public_url)?;
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(Self {
            base_url: root.join(WIDGET_PATH)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn generate_params(&self, config: &WidgetConfig) -> String {
        encode_query_params(config)
    }

    pub fn generate_url(&self, config: &WidgetConfig) -> String {
        format!("{}?{}", self.base_url, self.generate_params(config))
    }
}

// ============================================================================
// Settings Visibility
// ============================================================================

/// A checkbox that reveals an optional form section.
#[derive(Debug, Clone, Copy)]
pub struct SettingToggle {
    pub checkbox: &'static str,
    pub section: &'static str,
}

pub const SETTING_TOGGLES: &[SettingToggle] = &[SettingToggle {
    checkbox: "customStyling",
    section: "stylingSettings",
}];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionVisibility {
    pub section: &'static str,
    pub expanded: bool,
}

impl SectionVisibility {
    pub fn display(&self) -> &'static str {
        if self.expanded {
            "block"
        } else {
            "none"
        }
    }
}

pub struct SettingsManager;

impl SettingsManager {
    fn checkbox_value<'a>(form: &'a ConfiguratorForm, name: &str) -> Option<&'a str> {
        match name {
            "customStyling" => form.custom_styling.as_deref(),
            _ => None,
        }
    }

    pub fn visibility(form: &ConfiguratorForm) -> Vec<SectionVisibility> {
        SETTING_TOGGLES
            .iter()
            .map(|toggle| SectionVisibility {
                section: toggle.section,
                expanded: crate::models::is_checked(Self::checkbox_value(form, toggle.checkbox)),
            })
            .collect()
    }

    pub fn section(form: &ConfiguratorForm, section: &str) -> Option<SectionVisibility> {
        Self::visibility(form).into_iter().find(|v| v.section == section)
    }
}

// ============================================================================
// Display Manager
// ============================================================================

#[derive(Debug, Clone)]
pub struct WidgetDisplayManager {
    public_url: String,
}

impl WidgetDisplayManager {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into(),
        }
    }

    /// Regenerate the overlay URL and CSS for the current form state.
    pub fn update_display(&self, form: &ConfiguratorForm) -> Result<WidgetDisplay, Notification> {
        let generator = WidgetUrlGenerator::new(&self.public_url).map_err(|e| {
            tracing::error!("Error updating widget display: {}", e);
            Notification::danger("Failed to update widget display")
        })?;

        Ok(WidgetDisplay {
            url: generator.generate_url(&form.widget_config()),
            css: generate_css(&form.style_form()),
            show_result: true,
        })
    }
}

// ============================================================================
// Debounce
// ============================================================================

/// Keeps only the latest value and releases it after a quiet period.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait until the latest value has been quiet for the full delay.
    /// Cancel-safe: dropping the future keeps the pending value.
    pub async fn ready(&mut self) -> T {
        loop {
            match self.pending.take() {
                Some((value, deadline)) if deadline <= Instant::now() => return value,
                Some((value, deadline)) => {
                    self.pending = Some((value, deadline));
                    sleep_until(deadline).await;
                }
                None => std::future::pending::<()>().await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ConfiguratorForm {
        ConfiguratorForm {
            platform: Some("kick".to_string()),
            username: Some("foo".to_string()),
            format: Some("short".to_string()),
            hide_seconds: Some("on".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_url() {
        let generator = WidgetUrlGenerator::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(generator.base_url(), "http://127.0.0.1:3000/widget/uptime");
        assert_eq!(
            generator.generate_url(&form().widget_config()),
            "http://127.0.0.1:3000/widget/uptime?platform=kick&username=foo&format=short&hideSeconds=true"
        );
    }

    #[test]
    fn test_generate_url_under_subpath() {
        let generator = WidgetUrlGenerator::new("https://example.com/tools").unwrap();
        assert_eq!(generator.base_url(), "https://example.com/tools/widget/uptime");
    }

    #[test]
    fn test_settings_visibility() {
        let hidden = SettingsManager::section(&form(), "stylingSettings").unwrap();
        assert_eq!(hidden.display(), "none");

        let shown = ConfiguratorForm {
            custom_styling: Some("on".to_string()),
            ..form()
        };
        let visible = SettingsManager::section(&shown, "stylingSettings").unwrap();
        assert!(visible.expanded);
        assert_eq!(visible.display(), "block");
    }

    #[test]
    fn test_update_display() {
        let manager = WidgetDisplayManager::new("http://localhost:3000/");
        let shown = ConfiguratorForm {
            custom_styling: Some("on".to_string()),
            color: Some("#ffffff".to_string()),
            font_size: Some("32px".to_string()),
            ..form()
        };
        let display = manager.update_display(&shown).unwrap();
        assert!(display.url.starts_with("http://localhost:3000/widget/uptime?platform=kick"));
        assert_eq!(display.css, ":root {\n  --font-size: 32px;\n}");
        assert!(display.show_result);
    }

    #[test]
    fn test_update_display_bad_public_url() {
        let manager = WidgetDisplayManager::new("not a url");
        let err = manager.update_display(&form()).unwrap_err();
        assert_eq!(err.message, "Failed to update widget display");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_releases_latest() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push("a");
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.push("b");
        debouncer.push("c");
        let last_push = Instant::now();

        assert_eq!(debouncer.ready().await, "c");
        assert_eq!(last_push.elapsed(), Duration::from_millis(300));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_survives_cancellation() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push(1);

        let early = tokio::time::timeout(Duration::from_millis(50), debouncer.ready()).await;
        assert!(early.is_err());
        assert!(debouncer.is_pending());

        assert_eq!(debouncer.ready().await, 1);
    }
}
