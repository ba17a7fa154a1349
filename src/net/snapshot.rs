//! Snapshot loader — one bulk fetch of the fleet at startup.
//!
//! ERROR HANDLING
//! ==============
//! Any failure (transport, non-success status, unparseable body) leaves the
//! store empty and raises an acquisition alert. There is no retry here: once
//! the live channel is up, its reconnect cycle is the only path to fresher
//! state.

use std::time::Duration;

use tracing::{info, warn};

use crate::alert::{AlertKind, AlertSender, SNAPSHOT_FAILED_MESSAGE};
use crate::config::ClientConfig;
use crate::state::{FleetStore, RobotRecord, parse_fleet};

/// Errors produced while acquiring the initial snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The request did not complete.
    #[error("snapshot request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("snapshot endpoint returned status {status}")]
    Status { status: u16 },

    /// The body was not an array of robot records.
    #[error("snapshot body parse failed: {0}")]
    Decode(String),
}

pub struct SnapshotLoader {
    http: reqwest::Client,
    url: String,
}

impl SnapshotLoader {
    /// # Errors
    ///
    /// Returns [`SnapshotError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, SnapshotError> {
        let http = build_http_client(config.snapshot_timeout)?;
        Ok(Self { http, url: config.snapshot_url() })
    }

    /// Fetch and parse the snapshot.
    ///
    /// # Errors
    ///
    /// See [`SnapshotError`].
    pub async fn fetch(&self) -> Result<Vec<RobotRecord>, SnapshotError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SnapshotError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::Status { status: status.as_u16() });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SnapshotError::Request(e.to_string()))?;
        parse_fleet(&body).map_err(|e| SnapshotError::Decode(e.to_string()))
    }

    /// Fetch and install into `store`, alerting on failure.
    ///
    /// Returns `true` when a snapshot was installed.
    pub async fn load_into(&self, store: &FleetStore, alerts: &AlertSender) -> bool {
        match self.fetch().await {
            Ok(robots) => {
                info!(count = robots.len(), url = %self.url, "fleet snapshot loaded");
                store.install_snapshot(robots);
                true
            }
            Err(e) => {
                report_failure(&e, alerts);
                false
            }
        }
    }
}

pub(crate) fn report_failure(error: &SnapshotError, alerts: &AlertSender) {
    warn!(error = %error, "fleet snapshot failed; starting with empty fleet");
    alerts.raise(AlertKind::AcquisitionFailure, SNAPSHOT_FAILED_MESSAGE);
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, SnapshotError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SnapshotError::ClientBuild(e.to_string()))
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
