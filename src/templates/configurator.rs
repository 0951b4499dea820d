//! Configurator page: the widget form, the generated URL/CSS and a live
//! preview of the overlay.

use crate::configurator::{SettingsManager, SETTING_TOGGLES};
use crate::models::{ConfiguratorForm, Notification, WidgetDisplay};

use super::components::{base_html, html_escape};

const FONT_WEIGHTS: &[&str] = &["Select Weight", "100", "300", "400", "500", "700", "900"];
const TEXT_TRANSFORMS: &[&str] = &["none", "uppercase", "lowercase", "capitalize"];

fn selected(current: Option<&str>, value: &str) -> &'static str {
    if current == Some(value) {
        " selected"
    } else {
        ""
    }
}

fn checked(value: Option<&str>) -> &'static str {
    if crate::models::is_checked(value) {
        " checked"
    } else {
        ""
    }
}

fn options(values: &[&str], current: Option<&str>) -> String {
    values
        .iter()
        .map(|v| {
            format!(
                r#"<option value="{v}"{sel}>{v}</option>"#,
                v = html_escape(v),
                sel = selected(current, v)
            )
        })
        .collect()
}

fn text_input(name: &str, label: &str, value: Option<&str>, placeholder: &str) -> String {
    format!(
        r#"<div class="form-group">
                <label for="{name}">{label}</label>
                <input type="text" id="{name}" name="{name}" value="{value}" placeholder="{placeholder}">
            </div>"#,
        name = name,
        label = label,
        value = html_escape(value.unwrap_or("")),
        placeholder = html_escape(placeholder),
    )
}

fn font_options(fonts: &[String], current: Option<&str>) -> String {
    let default_sel = if current.map_or(true, str::is_empty) {
        " selected"
    } else {
        ""
    };
    let mut html = format!(r#"<option value=""{}>Default</option>"#, default_sel);
    for font in fonts {
        html.push_str(&format!(
            r#"<option value="{f}"{sel}>{f}</option>"#,
            f = html_escape(font),
            sel = selected(current, font)
        ));
    }
    html
}

fn result_html(display: Option<&WidgetDisplay>) -> String {
    let (url, css, visible) = match display {
        Some(d) => (d.url.as_str(), d.css.as_str(), d.show_result),
        None => ("", "", false),
    };

    format!(
        r#"<div class="panel result-section" style="display: {display}">
            <h2>Widget URL</h2>
            <code id="generatedUrl">{url}</code>
            <button type="button" class="btn" onclick="copyToClipboard('generatedUrl')">Copy URL</button>

            <h2>Custom CSS</h2>
            <pre id="generatedCSS">{css}</pre>
            <button type="button" class="btn" onclick="copyToClipboard('generatedCSS')">Copy CSS</button>

            <h2>Preview</h2>
            <iframe id="previewFrame" src="{url}" title="Widget preview"></iframe>
        </div>"#,
        display = if visible { "block" } else { "none" },
        url = html_escape(url),
        css = html_escape(css),
    )
}

pub fn render_configurator(
    form: &ConfiguratorForm,
    fonts: &[String],
    display: Option<&WidgetDisplay>,
    debounce_ms: u64,
    notifications: &[Notification],
) -> String {
    let styling = SettingsManager::section(form, "stylingSettings");
    let (styling_display, styling_expanded) = match styling {
        Some(v) => (v.display(), v.expanded),
        None => ("none", false),
    };
    let toggles: String = SETTING_TOGGLES
        .iter()
        .map(|t| format!("{}:{}", t.checkbox, t.section))
        .collect::<Vec<_>>()
        .join(",");

    let content = format!(
        r##"<h1>Stream Uptime Widget</h1>
        <form id="widgetForm" class="panel" method="get" action="/" data-debounce-ms="{debounce_ms}" data-toggles="{toggles}">
            <div class="form-row">
                <div class="form-group">
                    <label for="platform">Platform</label>
                    <select id="platform" name="platform">
                        <option value="twitch"{twitch}>Twitch</option>
                        <option value="kick"{kick}>Kick</option>
                    </select>
                </div>
                {username}
            </div>
            <div class="form-row">
                {prefix}
                <div class="form-group">
                    <label for="format">Format</label>
                    <select id="format" name="format">
                        <option value="short"{short}>Short (01:23:45)</option>
                        <option value="long"{long}>Long (1 hours, 23 minutes, 45 seconds)</option>
                    </select>
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="fontFamily">Font</label>
                    <select id="fontFamily" name="fontFamily">{font_options}</select>
                </div>
            </div>
            <label class="check"><input type="checkbox" name="hideSeconds" value="true"{hide_seconds}> Hide seconds</label>
            <label class="check"><input type="checkbox" name="customStyling" value="true"{custom_styling}> Custom styling</label>

            <div id="stylingSettings" style="display: {styling_display}" aria-expanded="{styling_expanded}">
                <div class="form-row">
                    {font_size}
                    <div class="form-group">
                        <label for="fontWeight">Font weight</label>
                        <select id="fontWeight" name="fontWeight">{weights}</select>
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="color">Text color</label>
                        <input type="color" id="color" name="color" value="{color}">
                    </div>
                    {letter_spacing}
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="textTransform">Text transform</label>
                        <select id="textTransform" name="textTransform">{transforms}</select>
                    </div>
                    {text_shadow}
                </div>
            </div>

            <button type="submit" class="btn">Generate</button>
        </form>
        {result}
        <script>{script}</script>"##,
        debounce_ms = debounce_ms,
        toggles = html_escape(&toggles),
        twitch = selected(form.platform.as_deref().or(Some("twitch")), "twitch"),
        kick = selected(form.platform.as_deref(), "kick"),
        username = text_input("username", "Username", form.username.as_deref(), "channel name"),
        prefix = text_input("prefix", "Prefix", form.prefix.as_deref(), "Uptime:"),
        short = selected(form.format.as_deref().or(Some("short")), "short"),
        long = selected(form.format.as_deref(), "long"),
        font_options = font_options(fonts, form.font_family.as_deref()),
        hide_seconds = checked(form.hide_seconds.as_deref()),
        custom_styling = checked(form.custom_styling.as_deref()),
        styling_display = styling_display,
        styling_expanded = styling_expanded,
        font_size = text_input("fontSize", "Font size", form.font_size.as_deref(), "36px"),
        weights = options(FONT_WEIGHTS, form.font_weight.as_deref()),
        color = html_escape(form.color.as_deref().unwrap_or("#ffffff")),
        letter_spacing = text_input(
            "letterSpacing",
            "Letter spacing",
            form.letter_spacing.as_deref(),
            "1px"
        ),
        transforms = options(TEXT_TRANSFORMS, form.text_transform.as_deref()),
        text_shadow = text_input(
            "textShadow",
            "Text shadow",
            form.text_shadow.as_deref(),
            "2px 2px 4px #000"
        ),
        result = result_html(display),
        script = CONFIGURATOR_JS,
    );

    base_html("Stream Uptime Widget", &content, notifications)
}

const CONFIGURATOR_JS: &str = r#"
(() => {
    const form = document.getElementById('widgetForm');
    if (!form) {
        console.error('Widget form not found');
        return;
    }

    const previewFrame = document.getElementById('previewFrame');
    const resultSection = document.querySelector('.result-section');
    const debounceMs = parseInt(form.dataset.debounceMs || '300', 10);
    let currentCss = document.getElementById('generatedCSS').textContent;
    let socket = null;

    // Section toggles ("checkbox:section" pairs)
    (form.dataset.toggles || '').split(',').filter(Boolean).forEach(pair => {
        const [checkbox, section] = pair.split(':');
        const checkboxElement = form.querySelector(`input[name="${checkbox}"]`);
        const sectionElement = document.getElementById(section);
        if (!checkboxElement || !sectionElement) return;
        checkboxElement.addEventListener('change', () => {
            sectionElement.style.display = checkboxElement.checked ? 'block' : 'none';
            sectionElement.setAttribute('aria-expanded', checkboxElement.checked);
        });
    });

    function formQuery() {
        return new URLSearchParams(new FormData(form)).toString();
    }

    function injectCSS(css) {
        if (!form.elements['customStyling'].checked) return;
        try {
            const doc = previewFrame.contentDocument || previewFrame.contentWindow.document;
            let styleElement = doc.querySelector('#injectedStyles');
            if (!styleElement) {
                styleElement = doc.createElement('style');
                styleElement.id = 'injectedStyles';
                doc.head.appendChild(styleElement);
            }
            styleElement.textContent = css;
        } catch (error) {
            console.error('Error injecting CSS:', error);
            showNotification('Failed to apply custom styles', 'warning');
        }
    }

    previewFrame.addEventListener('load', () => injectCSS(currentCss));

    function applyMessage(message) {
        if (message.type === 'notification') {
            showNotification(message.message, message.level);
            return;
        }
        currentCss = message.css;
        if (previewFrame.getAttribute('src') !== message.url) {
            previewFrame.src = message.url;
        } else {
            injectCSS(currentCss);
        }
        document.getElementById('generatedUrl').textContent = message.url;
        document.getElementById('generatedCSS').textContent = message.css;
        if (message.show_result) resultSection.style.display = 'block';
    }

    let fallbackTimer = null;
    function requestDisplay() {
        const query = formQuery();
        if (socket && socket.readyState === WebSocket.OPEN) {
            socket.send(query);
            return;
        }
        clearTimeout(fallbackTimer);
        fallbackTimer = setTimeout(async () => {
            try {
                const response = await fetch('/api/widget?' + query);
                applyMessage(await response.json());
            } catch (error) {
                console.error('Error updating widget display:', error);
                showNotification('Failed to update widget display', 'danger');
            }
        }, debounceMs);
    }

    function connect() {
        const proto = location.protocol === 'https:' ? 'wss' : 'ws';
        socket = new WebSocket(`${proto}://${location.host}/ws/configurator`);
        socket.onmessage = (event) => applyMessage(JSON.parse(event.data));
        socket.onclose = () => {
            socket = null;
            setTimeout(connect, 3000);
        };
    }

    form.querySelectorAll('input, select').forEach(element => {
        element.addEventListener('input', requestDisplay);
        element.addEventListener('change', requestDisplay);
    });

    form.addEventListener('submit', (e) => {
        e.preventDefault();
        requestDisplay();
    });

    window.copyToClipboard = async (elementId) => {
        const element = document.getElementById(elementId);
        const button = element.nextElementSibling;
        const originalText = button.textContent;
        try {
            await navigator.clipboard.writeText(element.textContent);
            button.textContent = 'Copied!';
            showNotification('Copied to clipboard!');
        } catch (error) {
            console.error('Failed to copy:', error);
            button.textContent = 'Failed to copy';
            showNotification('Failed to copy to clipboard', 'danger');
        } finally {
            setTimeout(() => { button.textContent = originalText; }, 2000);
        }
    };

    connect();
    requestDisplay();
})();
"#;
