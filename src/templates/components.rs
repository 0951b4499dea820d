//! Shared HTML components: escaping, notifications and the base page.

use crate::models::Notification;

use super::styles::STYLE;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Notifications
// ============================================================================

/// Server-rendered notification; the page script removes it after 3s.
pub fn notification_html(notification: &Notification) -> String {
    format!(
        r#"<div class="alert alert-{}" data-autohide="3000" role="alert">{}</div>"#,
        notification.level.as_str(),
        html_escape(&notification.message)
    )
}

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str, notifications: &[Notification]) -> String {
    let notifications_html: String = notifications.iter().map(notification_html).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        {content}
    </div>
    {notifications_html}
    <script>
    function showNotification(message, type = 'success') {{
        const notification = document.createElement('div');
        notification.className = 'alert alert-' + type;
        notification.textContent = message;
        document.body.appendChild(notification);
        setTimeout(() => notification.remove(), 3000);
    }}

    document.querySelectorAll('[data-autohide]').forEach(el => {{
        setTimeout(() => el.remove(), parseInt(el.dataset.autohide, 10));
    }});
    </script>
</body>
</html>"#,
        title = html_escape(title),
        STYLE = STYLE,
        content = content,
        notifications_html = notifications_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_is_escaped() {
        let html = notification_html(&Notification::danger("<b>oops</b>"));
        assert!(html.contains("alert-danger"));
        assert!(html.contains("&lt;b&gt;oops&lt;/b&gt;"));
    }

    #[test]
    fn test_base_html_title() {
        let html = base_html("Uptime & Co", "<p>hi</p>", &[]);
        assert!(html.contains("<title>Uptime &amp; Co</title>"));
        assert!(html.contains("<p>hi</p>"));
    }
}
