//! Timer-driven uptime display for one overlay instance.
//!
//! The manager owns its retry and render intervals and applies the
//! [`TimerCommand`]s produced by the state machine. Rendered labels are sent
//! on an mpsc channel; the loop ends once the receiver is dropped.

use super::machine::{TimerCommand, UptimeMachine};
use super::source::UptimeSource;
use crate::models::WidgetConfig;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub struct UptimeDisplayManager<S> {
    machine: UptimeMachine,
    source: S,
    retry_every: Duration,
    render_every: Duration,
    retry_timer: Option<Interval>,
    render_timer: Option<Interval>,
}

/// Interval whose first tick fires one full period from now.
fn delayed_interval(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn tick(timer: &mut Option<Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

impl<S: UptimeSource> UptimeDisplayManager<S> {
    pub fn new(
        config: WidgetConfig,
        source: S,
        retry_every: Duration,
        render_every: Duration,
    ) -> Self {
        Self {
            machine: UptimeMachine::new(config),
            source,
            retry_every,
            render_every,
            retry_timer: None,
            render_timer: None,
        }
    }

    pub fn machine(&self) -> &UptimeMachine {
        &self.machine
    }

    pub fn has_retry_timer(&self) -> bool {
        self.retry_timer.is_some()
    }

    pub fn has_render_timer(&self) -> bool {
        self.render_timer.is_some()
    }

    pub fn label(&self) -> String {
        self.machine.label(Utc::now())
    }

    /// Poll the platform once and apply the resulting transition.
    pub async fn fetch_uptime(&mut self) {
        if !self.machine.begin_fetch() {
            tracing::debug!(
                platform = %self.machine.config().platform,
                "no uptime endpoint for platform, skipping fetch"
            );
            return;
        }

        let result = self.source.fetch(self.machine.config()).await;
        for command in self.machine.resolve(result) {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::StartRetry => {
                if self.retry_timer.is_none() {
                    self.retry_timer = Some(delayed_interval(self.retry_every));
                }
            }
            TimerCommand::StopRetry => self.retry_timer = None,
            TimerCommand::StartRender => {
                if self.render_timer.is_none() {
                    self.render_timer = Some(delayed_interval(self.render_every));
                }
            }
            TimerCommand::StopRender => self.render_timer = None,
        }
    }

    /// Fetch, then keep rendering/retrying until `labels` is closed.
    pub async fn run(mut self, labels: mpsc::Sender<String>) {
        self.fetch_uptime().await;
        if labels.send(self.label()).await.is_err() {
            return;
        }

        loop {
            tokio::select! {
                _ = tick(&mut self.retry_timer) => {
                    self.fetch_uptime().await;
                    // Next retry is a full period after this fetch returned.
                    if let Some(retry) = self.retry_timer.as_mut() {
                        retry.reset();
                    }
                }
                _ = tick(&mut self.render_timer) => {}
                _ = labels.closed() => break,
            }

            if labels.send(self.label()).await.is_err() {
                break;
            }
        }

        tracing::debug!(username = %self.machine.config().username, "uptime display stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;
    use crate::uptime::machine::Phase;
    use crate::uptime::source::{StreamStatus, UptimeError};
    use chrono::{DateTime, Duration as ChronoDuration};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    enum Reply {
        Live(DateTime<Utc>),
        Offline,
        Fail,
    }

    /// Replays canned replies; the last one repeats forever.
    #[derive(Clone)]
    struct ScriptedSource {
        replies: Arc<Mutex<VecDeque<Reply>>>,
        calls: Arc<AtomicUsize>,
        latency: Duration,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Arc::new(Mutex::new(replies.into())),
                calls: Arc::new(AtomicUsize::new(0)),
                latency: Duration::ZERO,
            }
        }

        fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl UptimeSource for ScriptedSource {
        async fn fetch(&self, _config: &WidgetConfig) -> Result<StreamStatus, UptimeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            let mut replies = self.replies.lock().unwrap();
            let reply = if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().map(|r| match r {
                    Reply::Live(start) => Reply::Live(*start),
                    Reply::Offline => Reply::Offline,
                    Reply::Fail => Reply::Fail,
                })
            };
            match reply {
                Some(Reply::Live(start)) => Ok(StreamStatus::Live(start)),
                Some(Reply::Offline) | None => Ok(StreamStatus::Offline),
                Some(Reply::Fail) => Err(UptimeError::Status(reqwest::StatusCode::BAD_GATEWAY)),
            }
        }
    }

    fn config(platform: Platform) -> WidgetConfig {
        WidgetConfig {
            platform,
            username: "foo".to_string(),
            prefix: "Uptime".to_string(),
            ..Default::default()
        }
    }

    fn manager(platform: Platform, source: ScriptedSource) -> UptimeDisplayManager<ScriptedSource> {
        UptimeDisplayManager::new(
            config(platform),
            source,
            Duration::from_millis(3000),
            Duration::from_millis(1000),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_offline_keeps_one_retry_timer() {
        let source = ScriptedSource::new(vec![Reply::Offline]);
        let mut manager = manager(Platform::Kick, source.clone());

        manager.fetch_uptime().await;
        manager.fetch_uptime().await;

        assert_eq!(source.calls(), 2);
        assert!(manager.has_retry_timer());
        assert!(!manager.has_render_timer());
        assert_eq!(manager.machine().phase(), Phase::Offline);
        assert_eq!(manager.label(), "Offline");
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_swaps_retry_for_render() {
        let start = Utc::now() - ChronoDuration::seconds(30);
        let source = ScriptedSource::new(vec![Reply::Fail, Reply::Live(start)]);
        let mut manager = manager(Platform::Twitch, source.clone());

        manager.fetch_uptime().await;
        assert!(manager.has_retry_timer());

        manager.fetch_uptime().await;
        assert!(!manager.has_retry_timer());
        assert!(manager.has_render_timer());
        assert_eq!(manager.machine().stream_start(), Some(start));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsupported_platform_does_not_fetch() {
        let source = ScriptedSource::new(vec![Reply::Offline]);
        let mut manager = manager(Platform::Other("youtube".to_string()), source.clone());

        manager.fetch_uptime().await;

        assert_eq!(source.calls(), 0);
        assert!(!manager.has_retry_timer());
        assert_eq!(manager.label(), "Offline");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_retries_until_live_then_renders() {
        let start = Utc::now() - ChronoDuration::seconds(100);
        let source = ScriptedSource::new(vec![Reply::Offline, Reply::Offline, Reply::Live(start)]);
        let manager = manager(Platform::Kick, source.clone());

        let (tx, mut rx) = mpsc::channel(16);
        let handle = tokio::spawn(manager.run(tx));

        assert_eq!(rx.recv().await.as_deref(), Some("Offline"));
        assert_eq!(source.calls(), 1);

        let t0 = Instant::now();
        assert_eq!(rx.recv().await.as_deref(), Some("Offline"));
        assert_eq!(t0.elapsed(), Duration::from_millis(3000));
        assert_eq!(source.calls(), 2);

        let live = rx.recv().await.unwrap();
        assert!(live.starts_with("Uptime 00:01:"), "{}", live);
        assert_eq!(source.calls(), 3);

        let t1 = Instant::now();
        let next = rx.recv().await.unwrap();
        assert!(next.starts_with("Uptime 00:01:"), "{}", next);
        assert_eq!(t1.elapsed(), Duration::from_millis(1000));
        assert_eq!(source.calls(), 3);

        drop(rx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_retry_waits_full_period_after_fetch() {
        let source = ScriptedSource::new(vec![Reply::Offline])
            .with_latency(Duration::from_millis(5000));
        let manager = manager(Platform::Kick, source.clone());

        let (tx, mut rx) = mpsc::channel(16);
        let handle = tokio::spawn(manager.run(tx));

        assert_eq!(rx.recv().await.as_deref(), Some("Offline"));

        // Each retry: 3000ms wait after the previous fetch, then 5000ms of fetch.
        for expected_calls in 2..=3 {
            let t0 = Instant::now();
            assert_eq!(rx.recv().await.as_deref(), Some("Offline"));
            assert_eq!(t0.elapsed(), Duration::from_millis(8000));
            assert_eq!(source.calls(), expected_calls);
        }

        drop(rx);
        handle.await.unwrap();
    }
}
