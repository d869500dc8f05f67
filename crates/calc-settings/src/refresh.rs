//! Polling refresh.
//!
//! [`SettingsRefresher`] periodically fetches a snapshot from a source and
//! swaps it into a [`SharedSettings`]. Failed fetches are logged and leave
//! the last good snapshot in place.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::provider::SharedSettings;
use crate::retry::{RetryPolicy, with_retry};
use crate::source::SettingsSource;

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Keeps a [`SharedSettings`] in sync with a [`SettingsSource`].
#[derive(Debug)]
pub struct SettingsRefresher<S> {
    source: S,
    shared: SharedSettings,
    interval: Duration,
    policy: RetryPolicy,
}

impl<S: SettingsSource> SettingsRefresher<S> {
    pub fn new(source: S, shared: SharedSettings) -> Self {
        Self {
            source,
            shared,
            interval: DEFAULT_POLL_INTERVAL,
            policy: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn shared(&self) -> &SharedSettings {
        &self.shared
    }

    /// Fetch once (with retry) and swap the snapshot if it changed.
    ///
    /// Returns whether the snapshot changed. On error the current snapshot
    /// is left untouched.
    pub async fn refresh_once(&self) -> Result<bool> {
        let snapshot = with_retry(&self.policy, || self.source.fetch()).await?;
        let changed = self.shared.replace(snapshot);
        if changed {
            info!(source = %self.source.describe(), "settings updated");
        } else {
            debug!(source = %self.source.describe(), "settings unchanged");
        }
        Ok(changed)
    }

    /// Poll in a background task until the handle is shut down.
    ///
    /// The first poll runs immediately.
    pub fn spawn(self) -> RefreshHandle
    where
        S: 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(
                source = %self.source.describe(),
                interval_ms = self.interval.as_millis() as u64,
                "settings refresh started"
            );
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        if let Err(err) = self.refresh_once().await {
                            warn!(
                                error = %err,
                                hint = err.suggestion().as_deref().unwrap_or(""),
                                "settings refresh failed, keeping last snapshot"
                            );
                        }
                    }
                }
            }
            info!("settings refresh stopped");
        });
        RefreshHandle {
            stop: Some(stop_tx),
            task,
        }
    }
}

/// Handle to a running refresh task.
#[derive(Debug)]
pub struct RefreshHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop polling and wait for the task to finish.
    ///
    /// A refresh that is in flight completes first.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Err(err) = (&mut self.task).await {
            warn!(error = %err, "settings refresh task ended abnormally");
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if self.stop.is_some() {
            self.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SettingsProvider;
    use crate::snapshot::SettingsSnapshot;
    use crate::source::StaticSource;
    use calc_core::{CapabilitySettings, keys};

    #[tokio::test]
    async fn test_refresh_once_swaps_only_on_change() {
        let source = StaticSource::default();
        let refresher = SettingsRefresher::new(source.clone(), SharedSettings::default());
        assert!(!refresher.refresh_once().await.unwrap());

        source.set(SettingsSnapshot::new(
            true,
            CapabilitySettings::new().with(keys::SQRT, false),
        ));
        assert!(refresher.refresh_once().await.unwrap());
        assert!(
            !refresher
                .shared()
                .current_settings()
                .capabilities
                .is_enabled(keys::SQRT)
        );
        assert!(!refresher.refresh_once().await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_refresher_picks_up_changes() {
        let source = StaticSource::default();
        let shared = SharedSettings::default();
        let mut changes = shared.subscribe();
        let handle = SettingsRefresher::new(source.clone(), shared.clone())
            .with_interval(Duration::from_secs(5))
            .spawn();

        source.set(SettingsSnapshot::new(false, CapabilitySettings::new()));
        changes.changed().await.unwrap();
        assert!(!shared.current_settings().calculator_enabled);

        handle.shutdown().await;
    }
}
