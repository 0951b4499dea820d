//! Elapsed-time formatting for the uptime label.

use crate::models::Format;

pub const OFFLINE_LABEL: &str = "Offline";

/// Whole-second duration split into display units. Hours are not wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Elapsed {
    pub fn from_secs(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    #[cfg(test)]
    pub fn total_secs(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

pub fn format_elapsed(elapsed: Elapsed, format: Format, hide_seconds: bool) -> String {
    let Elapsed {
        hours,
        minutes,
        seconds,
    } = elapsed;

    match (format, hide_seconds) {
        (Format::Short, false) => format!("{:02}:{:02}:{:02}", hours, minutes, seconds),
        (Format::Short, true) => format!("{:02}:{:02}", hours, minutes),
        (Format::Long, false) => format!(
            "{} hours, {} minutes, {} seconds",
            hours, minutes, seconds
        ),
        (Format::Long, true) => format!("{} hours, {} minutes", hours, minutes),
    }
}

pub fn format_uptime(total_secs: u64, format: Format, hide_seconds: bool) -> String {
    format_elapsed(Elapsed::from_secs(total_secs), format, hide_seconds)
}

/// Label for a live stream: the prefix, one space, then the formatted time.
pub fn live_label(prefix: &str, total_secs: u64, format: Format, hide_seconds: bool) -> String {
    format!("{} {}", prefix, format_uptime(total_secs, format, hide_seconds))
}
