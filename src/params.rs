//! Overlay query-string contract.
//!
//! The configurator encodes a [`WidgetConfig`] into the overlay URL and the
//! overlay decodes it back. Parameter names: `platform`, `username`,
//! `prefix`, `format`, `hideSeconds`, `fontFamily`.

use crate::models::{Format, Platform, WidgetConfig};
use std::collections::HashMap;
use url::form_urlencoded;

pub const PLATFORM: &str = "platform";
pub const USERNAME: &str = "username";
pub const PREFIX: &str = "prefix";
pub const FORMAT: &str = "format";
pub const HIDE_SECONDS: &str = "hideSeconds";
pub const FONT_FAMILY: &str = "fontFamily";

/// Decode an overlay configuration from a raw query string (with or without
/// the leading `?`). The first occurrence of a repeated key wins.
pub fn parse_query_params(query: &str) -> WidgetConfig {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    from_map(&params)
}

/// Decode from already-split parameters (e.g. an axum `Query<HashMap>`).
pub fn from_map(params: &HashMap<String, String>) -> WidgetConfig {
    let get = |key: &str| params.get(key).map(String::as_str);

    WidgetConfig {
        platform: Platform::from_param(get(PLATFORM)),
        username: get(USERNAME).unwrap_or_default().to_string(),
        prefix: get(PREFIX).unwrap_or_default().to_string(),
        format: Format::from_param(get(FORMAT)),
        hide_seconds: get(HIDE_SECONDS) == Some("true"),
        font_family: get(FONT_FAMILY).map(str::to_string),
    }
}

/// Encode a configuration as `application/x-www-form-urlencoded`.
///
/// Empty fields are skipped; `hideSeconds` only appears when set.
pub fn encode_query_params(config: &WidgetConfig) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    let mut append = |key: &str, value: &str| {
        if !value.is_empty() {
            serializer.append_pair(key, value);
        }
    };

    append(PLATFORM, config.platform.as_str());
    append(USERNAME, &config.username);
    append(PREFIX, &config.prefix);
    append(FORMAT, config.format.as_str());
    if config.hide_seconds {
        append(HIDE_SECONDS, "true");
    }
    if let Some(ref font) = config.font_family {
        append(FONT_FAMILY, font);
    }

    serializer.finish()
}
