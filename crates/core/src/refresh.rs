//! Background auto-refresh of the watchlist.
//!
//! The scheduler moves the [`Session`] into a tokio task that refreshes the
//! whole watchlist on a fixed interval and streams the resulting reports
//! back over a channel. Stopping the scheduler is cooperative and returns
//! the session, cache and all.

use std::time::Duration;

use log::{debug, info};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::constants::MIN_REFRESH_INTERVAL_SECS;
use crate::session::{Session, SymbolReport};

/// Auto-refresh settings.
#[derive(Clone, Copy, Debug)]
pub struct RefreshConfig {
    interval: Duration,
}

impl RefreshConfig {
    /// Refresh every `secs` seconds, clamped up to the provider-friendly
    /// minimum of [`MIN_REFRESH_INTERVAL_SECS`].
    pub fn every_secs(secs: u64) -> Self {
        Self {
            interval: Duration::from_secs(secs.max(MIN_REFRESH_INTERVAL_SECS)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::every_secs(60)
    }
}

/// Handle to a running refresh task.
pub struct RefreshHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<Session>,
}

impl RefreshHandle {
    /// Signal the task to stop and get the session back.
    ///
    /// An in-flight refresh cycle finishes first; the stop takes effect at
    /// the next scheduling point.
    pub async fn stop(self) -> Session {
        // Receiver dropping first means the task already finished.
        let _ = self.stop_tx.send(true);
        match self.task.await {
            Ok(session) => session,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

/// Spawn the auto-refresh loop over a session.
///
/// The first cycle runs immediately; each subsequent cycle waits out the
/// configured interval. Every cycle's reports are sent as one batch; if the
/// receiver is dropped the loop keeps the session warm regardless.
pub fn spawn_refresh(
    mut session: Session,
    config: RefreshConfig,
) -> (RefreshHandle, mpsc::UnboundedReceiver<Vec<SymbolReport>>) {
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let (report_tx, report_rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(
            "Auto-refresh started, interval {}s",
            config.interval.as_secs()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let reports = session.refresh_watchlist().await;
                    debug!("Refreshed {} symbols", reports.len());
                    let _ = report_tx.send(reports);
                }
                _ = stop_rx.changed() => {
                    info!("Auto-refresh stopping");
                    break;
                }
            }
        }
        session
    });

    (RefreshHandle { stop_tx, task }, report_rx)
}
