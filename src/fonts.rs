//! Web-font support: the selectable font list and the overlay's font link.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

pub const GOOGLE_FONTS_CSS: &str = "https://fonts.googleapis.com/css";
pub const FONT_WEIGHTS: &str = "wght@100;300;400;500;700;900";
pub const FONT_LOAD_FAILED: &str = "Failed to load fonts. Please try again later.";

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to fetch fonts: {0}")]
    Http(#[from] reqwest::Error),
    #[error("font list answered with status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FontList {
    pub fonts: Vec<String>,
}

/// Font names from the remote list, fetched once and then cached.
pub struct FontCatalog {
    client: reqwest::Client,
    url: String,
    cache: RwLock<Option<Vec<String>>>,
}

impl FontCatalog {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            cache: RwLock::new(None),
        }
    }

    /// Seed the cache without a network round trip.
    #[cfg(test)]
    pub fn with_fonts(client: reqwest::Client, fonts: Vec<String>) -> Self {
        Self {
            client,
            url: String::new(),
            cache: RwLock::new(Some(fonts)),
        }
    }

    pub async fn fonts(&self) -> Result<Vec<String>, FontError> {
        if let Some(fonts) = self.cache.read().await.as_ref() {
            return Ok(fonts.clone());
        }

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FontError::Status(response.status()));
        }
        let list: FontList = response.json().await?;

        tracing::info!(count = list.fonts.len(), "loaded font list");
        *self.cache.write().await = Some(list.fonts.clone());
        Ok(list.fonts)
    }
}

// ============================================================================
// Overlay Font
// ============================================================================

/// What the overlay page needs to switch to a custom font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontManager {
    pub family: String,
}

impl FontManager {
    /// `None` when no font family was requested.
    pub fn for_family(family: Option<&str>) -> Option<Self> {
        family
            .filter(|f| !f.is_empty())
            .map(|f| Self {
                family: f.to_string(),
            })
    }

    pub fn stylesheet_url(&self) -> String {
        format!(
            "{}?family={}:{}",
            GOOGLE_FONTS_CSS,
            urlencoding::encode(&self.family),
            FONT_WEIGHTS
        )
    }

    /// Value for the `--font-family` custom property, with a serif fallback.
    /// Characters that could end the quoted name or the style block are dropped.
    pub fn css_value(&self) -> String {
        let family: String = self
            .family
            .chars()
            .filter(|c| !matches!(c, '"' | '\\' | '<' | '>'))
            .collect();
        format!("\"{}\", serif", family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_font_requested() {
        assert_eq!(FontManager::for_family(None), None);
        assert_eq!(FontManager::for_family(Some("")), None);
    }

    #[test]
    fn test_stylesheet_url() {
        let font = FontManager::for_family(Some("Open Sans")).unwrap();
        assert_eq!(
            font.stylesheet_url(),
            "https://fonts.googleapis.com/css?family=Open%20Sans:wght@100;300;400;500;700;900"
        );
        assert_eq!(font.css_value(), "\"Open Sans\", serif");
    }

    #[test]
    fn test_css_value_cannot_escape_style() {
        let font = FontManager::for_family(Some("x\"</style><script>")).unwrap();
        assert_eq!(font.css_value(), "\"x/stylescript\", serif");
    }

    #[test]
    fn test_font_list_shape() {
        let list: FontList = serde_json::from_str(r#"{"fonts":["Roboto","Lato"]}"#).unwrap();
        assert_eq!(list.fonts, vec!["Roboto", "Lato"]);
    }

    #[tokio::test]
    async fn test_seeded_catalog_skips_network() {
        let catalog = FontCatalog::with_fonts(reqwest::Client::new(), vec!["Lato".to_string()]);
        assert_eq!(catalog.fonts().await.unwrap(), vec!["Lato"]);
    }
}
