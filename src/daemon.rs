//! Scheduler that drives the poller.
//!
//! Runs a pass on start, then one per interval until a shutdown signal.
//! Passes are awaited in line, so they never overlap: a pass that outlives
//! the interval delays the next one instead of stacking up behind it.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::poller::FeedPoller;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Time between passes (default: 30 minutes)
    pub interval: Duration,
    /// Whether to run a pass immediately on start
    pub poll_on_start: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30 * 60),
            poll_on_start: true,
        }
    }
}

impl DaemonConfig {
    /// Parse interval string like "1h", "30m", "90s", "1d" into seconds
    pub fn parse_interval(s: &str) -> Result<u64, String> {
        let s = s.trim().to_lowercase();

        let (digits, unit, label) = if let Some(hours) = s.strip_suffix('h') {
            (hours, 3600, "hours")
        } else if let Some(minutes) = s.strip_suffix('m') {
            (minutes, 60, "minutes")
        } else if let Some(days) = s.strip_suffix('d') {
            (days, 86400, "days")
        } else if let Some(secs) = s.strip_suffix('s') {
            (secs, 1, "seconds")
        } else {
            (s.as_str(), 1, "interval")
        };

        let secs = digits
            .parse::<u64>()
            .map_err(|_| match label {
                "interval" => format!("Invalid interval: {}. Use format like '30m', '1h', '1d'", s),
                _ => format!("Invalid {}: {}", label, digits),
            })?
            .checked_mul(unit)
            .ok_or_else(|| format!("Interval too large: {}", s))?;

        if secs == 0 {
            return Err("Interval must be greater than zero".to_string());
        }
        Ok(secs)
    }

    /// Format interval for display
    pub fn format_interval(secs: u64) -> String {
        if secs >= 86400 && secs % 86400 == 0 {
            format!("{}d", secs / 86400)
        } else if secs >= 3600 && secs % 3600 == 0 {
            format!("{}h", secs / 3600)
        } else if secs >= 60 && secs % 60 == 0 {
            format!("{}m", secs / 60)
        } else {
            format!("{}s", secs)
        }
    }
}

/// Daemon runner
pub struct Daemon {
    poller: FeedPoller,
    config: DaemonConfig,
}

impl Daemon {
    pub fn new(poller: FeedPoller, config: DaemonConfig) -> Self {
        Self { poller, config }
    }

    pub fn poller(&self) -> &FeedPoller {
        &self.poller
    }

    /// Run until SIGINT or SIGTERM.
    pub async fn run(&mut self) -> std::io::Result<()> {
        let shutdown = shutdown_signal()?;
        self.run_until(shutdown).await;
        Ok(())
    }

    /// Run until `shutdown` completes. A pass in progress is finished first.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        info!(
            "feedbell started (poll interval: {}, feeds: {}, PID: {})",
            DaemonConfig::format_interval(self.config.interval.as_secs()),
            self.poller.feeds().len(),
            std::process::id()
        );

        if self.config.poll_on_start {
            info!("Running initial pass...");
            self.run_pass().await;
        }

        let mut timer = interval(self.config.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer.tick().await; // Skip the first immediate tick

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = timer.tick() => {
                    info!("Running scheduled pass...");
                    self.run_pass().await;
                }
            }
        }

        info!("Shutting down...");
    }

    async fn run_pass(&mut self) {
        let start = Instant::now();
        let summary = self.poller.poll_once().await;
        let elapsed = start.elapsed();

        info!(
            "Pass complete: {} feeds, {} announced, {} feed errors, {} delivery errors ({:.1}s)",
            summary.feeds,
            summary.announced,
            summary.failed_feeds,
            summary.failed_deliveries,
            elapsed.as_secs_f64()
        );

        if elapsed >= self.config.interval {
            warn!(
                "Pass took {:.1}s, longer than the {} interval; the next pass is delayed",
                elapsed.as_secs_f64(),
                DaemonConfig::format_interval(self.config.interval.as_secs())
            );
        }
    }
}

/// Resolves on the first SIGINT or SIGTERM.
#[cfg(unix)]
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    Ok(async move {
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv() => {},
        }
    })
}

/// Resolves on the first Ctrl-C.
#[cfg(not(unix))]
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    Ok(async {
        let _ = tokio::signal::ctrl_c().await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotifierConfig;
    use crate::domain::FeedConfig;
    use crate::image::{ImageConfig, ImageResolver};
    use crate::notifier::NotificationComposer;
    use crate::poller::Announcer;
    use crate::testing::{items, RecordingDelivery, StaticFeedFetcher, StaticMarkupFetcher};
    use std::sync::Arc;

    const FEED: &str = "https://example.org/feed.xml";

    fn daemon(fetcher: Arc<StaticFeedFetcher>, config: DaemonConfig) -> Daemon {
        let delivery = Arc::new(RecordingDelivery::default().with_destination("1"));
        let images =
            ImageResolver::new(Arc::new(StaticMarkupFetcher::default()), ImageConfig::default())
                .unwrap();
        let announcer = Announcer::new(
            delivery,
            images,
            NotificationComposer::new(NotifierConfig::default()),
        );
        let poller = FeedPoller::new(vec![FeedConfig::new("Lab", FEED, "1")], fetcher, announcer);
        Daemon::new(poller, config)
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(DaemonConfig::parse_interval("1h").unwrap(), 3600);
        assert_eq!(DaemonConfig::parse_interval("30m").unwrap(), 1800);
        assert_eq!(DaemonConfig::parse_interval("1d").unwrap(), 86400);
        assert_eq!(DaemonConfig::parse_interval("60s").unwrap(), 60);
        assert_eq!(DaemonConfig::parse_interval("3600").unwrap(), 3600);
        assert!(DaemonConfig::parse_interval("invalid").is_err());
        assert!(DaemonConfig::parse_interval("0m").is_err());
    }

    #[test]
    fn test_parse_interval_rejects_overflow() {
        let err = DaemonConfig::parse_interval("99999999999999999h").unwrap_err();
        assert!(err.starts_with("Interval too large"), "{}", err);
        assert!(DaemonConfig::parse_interval("999999999999999999d").is_err());
        assert_eq!(
            DaemonConfig::parse_interval(&format!("{}s", u64::MAX)).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(DaemonConfig::format_interval(3600), "1h");
        assert_eq!(DaemonConfig::format_interval(1800), "30m");
        assert_eq!(DaemonConfig::format_interval(86400), "1d");
        assert_eq!(DaemonConfig::format_interval(90), "90s");
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_start_then_every_interval() {
        let fetcher = Arc::new(StaticFeedFetcher::default());
        fetcher.set_items(FEED, items(&["T1"]));
        let mut daemon = daemon(
            fetcher.clone(),
            DaemonConfig {
                interval: Duration::from_secs(60),
                poll_on_start: true,
            },
        );

        daemon
            .run_until(tokio::time::sleep(Duration::from_secs(150)))
            .await;

        // t=0, t=60, t=120
        assert_eq!(fetcher.calls().len(), 3);
        assert_eq!(daemon.poller().state().last_title(FEED), Some("T1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_skip_initial_pass() {
        let fetcher = Arc::new(StaticFeedFetcher::default());
        fetcher.set_items(FEED, items(&["T1"]));
        let mut daemon = daemon(
            fetcher.clone(),
            DaemonConfig {
                interval: Duration::from_secs(60),
                poll_on_start: false,
            },
        );

        daemon
            .run_until(tokio::time::sleep(Duration::from_secs(90)))
            .await;

        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_immediate_shutdown_still_runs_initial_pass() {
        let fetcher = Arc::new(StaticFeedFetcher::default());
        fetcher.set_items(FEED, items(&["T1"]));
        let mut daemon = daemon(fetcher.clone(), DaemonConfig::default());

        daemon.run_until(async {}).await;

        assert_eq!(fetcher.calls().len(), 1);
    }
}
