//! Backend maintenance tracking.
//!
//! A [`MaintenanceWatch`] flips into maintenance when a call fails with a
//! server-side error, and leaves it once a readiness probe succeeds again,
//! either through a manual [`retry`](MaintenanceWatch::retry) or the
//! automatic loop in [`run`](MaintenanceWatch::run).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::client::LineageClient;
use crate::error::Result;

/// Delay between automatic retries while in maintenance.
pub const AUTO_RETRY_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Whether the backend is currently usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    Available,
    Maintenance,
}

/// Tracks backend availability for one client.
#[derive(Debug)]
pub struct MaintenanceWatch {
    client: LineageClient,
    interval: Duration,
    maintenance: AtomicBool,
    retrying: AtomicBool,
}

impl MaintenanceWatch {
    pub fn new(client: LineageClient) -> Self {
        Self {
            client,
            interval: AUTO_RETRY_INTERVAL,
            maintenance: AtomicBool::new(false),
            retrying: AtomicBool::new(false),
        }
    }

    /// Use a custom delay between automatic retries.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn status(&self) -> BackendStatus {
        if self.maintenance.load(Ordering::SeqCst) {
            BackendStatus::Maintenance
        } else {
            BackendStatus::Available
        }
    }

    /// True while a retry probe is in flight.
    pub fn is_retrying(&self) -> bool {
        self.retrying.load(Ordering::SeqCst)
    }

    /// Record the outcome of an API call.
    ///
    /// Server failures put the backend in maintenance. Client-side errors
    /// such as 401 or 422 say nothing about availability and are ignored.
    pub fn observe<T>(&self, result: &Result<T>) -> BackendStatus {
        match result {
            Err(e) if e.is_server_failure() => {
                if !self.maintenance.swap(true, Ordering::SeqCst) {
                    tracing::warn!(error = %e, "backend entered maintenance");
                }
            }
            Ok(_) => {
                if self.maintenance.swap(false, Ordering::SeqCst) {
                    tracing::info!("backend available again");
                }
            }
            Err(_) => {}
        }
        self.status()
    }

    /// Probe the backend once and update the status.
    ///
    /// A call made while another retry is running returns the current
    /// status without probing.
    pub async fn retry(&self) -> BackendStatus {
        if self
            .retrying
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return self.status();
        }

        let probe = {
            let _guard = RetryGuard(&self.retrying);
            self.client.check_health().await
        };

        match probe {
            Ok(()) => {
                if self.maintenance.swap(false, Ordering::SeqCst) {
                    tracing::info!("backend available again");
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "backend still in maintenance");
                self.maintenance.store(true, Ordering::SeqCst);
            }
        }
        self.status()
    }

    /// Retry on every interval tick until the backend is available.
    ///
    /// Returns immediately when not in maintenance.
    pub async fn run(&self) {
        while self.status() == BackendStatus::Maintenance {
            tokio::time::sleep(self.interval).await;
            tracing::info!(interval = ?self.interval, "automatic maintenance retry");
            self.retry().await;
        }
    }
}

/// Clears the retry flag when the probe finishes or its future is dropped.
struct RetryGuard<'a>(&'a AtomicBool);

impl Drop for RetryGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
