//! CSS styles for the configurator and the overlay.

// ============================================================================
// Configurator Styles
// ============================================================================

pub const STYLE: &str = r#"
:root {
    --bg: #0e0e10;
    --panel: #18181b;
    --border: #2f2f35;
    --fg: #efeff1;
    --muted: #adadb8;
    --accent: #9147ff;
    --accent-hover: #772ce8;
    --success: #00a86b;
    --danger: #e91916;
    --warning: #d9a300;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.5;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 860px;
    margin: 0 auto;
    padding: 1.5rem 1rem;
}

h1 { font-size: 1.6rem; margin-bottom: 1rem; }
h2 { font-size: 1.1rem; margin: 1.5rem 0 0.5rem; }

.panel {
    background: var(--panel);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 1rem 1.25rem;
    margin-bottom: 1rem;
}

.form-row {
    display: flex;
    gap: 1rem;
    margin-bottom: 0.75rem;
    flex-wrap: wrap;
}

.form-group { flex: 1; min-width: 180px; }
.form-group label { display: block; color: var(--muted); font-size: 0.85rem; margin-bottom: 0.25rem; }

input[type="text"], select {
    width: 100%;
    padding: 0.45rem 0.6rem;
    background: var(--bg);
    color: var(--fg);
    border: 1px solid var(--border);
    border-radius: 4px;
}

input[type="color"] { width: 100%; height: 2.1rem; background: var(--bg); border: 1px solid var(--border); }

.check { display: flex; align-items: center; gap: 0.5rem; margin: 0.5rem 0; }

.btn {
    background: var(--accent);
    color: #fff;
    border: none;
    border-radius: 4px;
    padding: 0.45rem 0.9rem;
    cursor: pointer;
}
.btn:hover { background: var(--accent-hover); }

.result-section code, .result-section pre {
    display: block;
    background: var(--bg);
    border: 1px solid var(--border);
    border-radius: 4px;
    padding: 0.6rem;
    margin-bottom: 0.5rem;
    word-break: break-all;
    white-space: pre-wrap;
    font-family: "SF Mono", Monaco, Consolas, monospace;
    font-size: 0.85rem;
}

#previewFrame {
    width: 100%;
    height: 140px;
    border: 1px dashed var(--border);
    border-radius: 4px;
    background: transparent;
}

.alert {
    position: fixed;
    top: 0;
    right: 0;
    margin: 1rem;
    padding: 0.6rem 1rem;
    border-radius: 4px;
    color: #fff;
    z-index: 10;
}
.alert-success { background: var(--success); }
.alert-danger { background: var(--danger); }
.alert-warning { background: var(--warning); }
"#;

// ============================================================================
// Overlay Styles
// ============================================================================

/// Overlay defaults; every custom property can be overridden by the CSS the
/// configurator generates.
pub const OVERLAY_STYLE: &str = r#"
:root {
    --font-family: "Inter", sans-serif;
    --font-size: 36px;
    --font-weight: 700;
    --text-color: #ffffff;
    --letter-spacing: normal;
    --text-transform: none;
    --text-shadow: 2px 2px 4px rgba(0, 0, 0, 0.6);
}

html, body {
    margin: 0;
    padding: 0;
    background: transparent;
    overflow: hidden;
}

#uptimeLabel {
    font-family: var(--font-family);
    font-size: var(--font-size);
    font-weight: var(--font-weight);
    color: var(--text-color);
    letter-spacing: var(--letter-spacing);
    text-transform: var(--text-transform);
    text-shadow: var(--text-shadow);
    white-space: pre;
}
"#;
