//! Overlay page: a single uptime label fed over a WebSocket.

use crate::fonts::FontManager;

use super::components::html_escape;
use super::styles::OVERLAY_STYLE;

pub fn render_overlay(initial_label: &str, font: Option<&FontManager>) -> String {
    let font_head = match font {
        Some(font) => format!(
            r#"<link rel="stylesheet" href="{href}">
    <style>:root {{ --font-family: {family}; }} html {{ font-family: var(--font-family); }}</style>"#,
            href = html_escape(&font.stylesheet_url()),
            family = font.css_value(),
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Uptime</title>
    <style>{style}</style>
    {font_head}
</head>
<body>
    <div id="uptimeLabel">{label}</div>
    <script>{script}</script>
</body>
</html>"#,
        style = OVERLAY_STYLE,
        font_head = font_head,
        label = html_escape(initial_label),
        script = OVERLAY_JS,
    )
}

const OVERLAY_JS: &str = r#"
(() => {
    const label = document.getElementById('uptimeLabel');
    const proto = location.protocol === 'https:' ? 'wss' : 'ws';

    function connect() {
        const socket = new WebSocket(`${proto}://${location.host}/ws/uptime${location.search}`);
        socket.onmessage = (event) => { label.textContent = event.data; };
        socket.onclose = () => setTimeout(connect, 3000);
    }

    connect();
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_without_font() {
        let html = render_overlay("Offline", None);
        assert!(html.contains(r#"<div id="uptimeLabel">Offline</div>"#));
        assert!(!html.contains("fonts.googleapis.com"));
    }

    #[test]
    fn test_overlay_with_font() {
        let font = FontManager::for_family(Some("Press Start 2P")).unwrap();
        let html = render_overlay("Offline", Some(&font));
        assert!(html.contains("family=Press%20Start%202P:wght@100;300;400;500;700;900"));
        assert!(html.contains(r#"--font-family: "Press Start 2P", serif;"#));
    }
}
