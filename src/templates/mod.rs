//! HTML templates and styling for the uptime widget.
//!
//! ## Module Structure
//!
//! - `styles` - CSS for the configurator and the overlay
//! - `components` - escaping, notifications and the base page
//! - `configurator` - the widget form with live preview
//! - `overlay` - the uptime label page

mod components;
mod configurator;
mod overlay;
mod styles;

pub use components::{base_html, html_escape, notification_html};
pub use configurator::render_configurator;
pub use overlay::render_overlay;
pub use styles::{OVERLAY_STYLE, STYLE};
