//! Uptime state machine.
//!
//! Pure bookkeeping for one overlay: the current phase, the known stream
//! start, and which timers should be running. Transitions return the timer
//! commands the driver has to carry out, so the machine itself never touches
//! a clock or a socket.

use super::source::{StreamStatus, UptimeError};
use crate::format::{live_label, OFFLINE_LABEL};
use crate::models::WidgetConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Unknown,
    Polling,
    Live,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    StartRetry,
    StopRetry,
    StartRender,
    StopRender,
}

#[derive(Debug, Clone)]
pub struct UptimeMachine {
    config: WidgetConfig,
    phase: Phase,
    stream_start: Option<DateTime<Utc>>,
    retry_active: bool,
    render_active: bool,
}

impl UptimeMachine {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            phase: Phase::Unknown,
            stream_start: None,
            retry_active: false,
            render_active: false,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stream_start(&self) -> Option<DateTime<Utc>> {
        self.stream_start
    }

    pub fn retry_active(&self) -> bool {
        self.retry_active
    }

    pub fn render_active(&self) -> bool {
        self.render_active
    }

    /// Mark a fetch as in flight. Returns `false` (and stays put) when the
    /// platform has no endpoint to poll.
    pub fn begin_fetch(&mut self) -> bool {
        if !self.config.platform.is_supported() {
            return false;
        }
        self.phase = Phase::Polling;
        true
    }

    /// Feed the outcome of a fetch. Errors count as offline.
    pub fn resolve(&mut self, result: Result<StreamStatus, UptimeError>) -> Vec<TimerCommand> {
        match result {
            Ok(StreamStatus::Live(start)) => self.enter_live(start),
            Ok(StreamStatus::Offline) => self.enter_offline(),
            Err(e) => {
                tracing::warn!(
                    platform = %self.config.platform,
                    username = %self.config.username,
                    "Error fetching uptime: {}",
                    e
                );
                self.enter_offline()
            }
        }
    }

    pub fn enter_live(&mut self, start: DateTime<Utc>) -> Vec<TimerCommand> {
        let mut commands = Vec::new();
        self.stream_start = Some(start);
        self.phase = Phase::Live;

        if self.retry_active {
            self.retry_active = false;
            commands.push(TimerCommand::StopRetry);
        }
        if !self.render_active {
            self.render_active = true;
            commands.push(TimerCommand::StartRender);
        }

        tracing::debug!(username = %self.config.username, %start, "stream live");
        commands
    }

    pub fn enter_offline(&mut self) -> Vec<TimerCommand> {
        let mut commands = Vec::new();
        self.stream_start = None;
        self.phase = Phase::Offline;

        if self.render_active {
            self.render_active = false;
            commands.push(TimerCommand::StopRender);
        }
        if !self.retry_active {
            self.retry_active = true;
            commands.push(TimerCommand::StartRetry);
        }

        tracing::debug!(username = %self.config.username, "stream offline");
        commands
    }

    /// Whole seconds since the stream started, only while live.
    /// A start time in the future counts as zero.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> Option<u64> {
        if self.phase != Phase::Live {
            return None;
        }
        let start = self.stream_start?;
        Some((now - start).num_seconds().max(0) as u64)
    }

    pub fn label(&self, now: DateTime<Utc>) -> String {
        match self.elapsed_secs(now) {
            Some(secs) => live_label(
                &self.config.prefix,
                secs,
                self.config.format,
                self.config.hide_seconds,
            ),
            None => OFFLINE_LABEL.to_string(),
        }
    }
}
