//! Stream uptime tracking for the overlay.
//!
//! ## Module Structure
//!
//! - `source` - platform endpoints and reply parsing
//! - `machine` - pure state machine (phase, start time, timer bookkeeping)
//! - `manager` - tokio driver owning the retry/render intervals

mod machine;
mod manager;
mod source;

pub use machine::{Phase, TimerCommand, UptimeMachine};
pub use manager::UptimeDisplayManager;
pub use source::{
    endpoint_url, parse_kick_livestream, parse_timestamp, parse_twitch_elapsed,
    twitch_start_time, HttpUptimeSource, StreamStatus, UptimeError, UptimeSource,
};
