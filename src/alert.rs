//! User-facing alerts.
//!
//! Two failures are surfaced to the user rather than only logged: a failed
//! initial snapshot and a push transport error. Neither is fatal. The core
//! hands them to whatever presentation surface holds the receiving end and
//! never waits for it.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

/// Alerts queued for a surface that is not reading; newer ones are dropped.
pub const ALERT_QUEUE_CAPACITY: usize = 16;

pub const SNAPSHOT_FAILED_MESSAGE: &str =
    "Failed to fetch robot data. Please check if the backend is running.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    /// Initial snapshot could not be acquired.
    AcquisitionFailure,
    /// Push connection failed or errored.
    ChannelTransportError,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// Sending half handed to the core. Sends are fire-and-forget.
#[derive(Clone, Debug)]
pub struct AlertSender {
    tx: mpsc::Sender<Alert>,
}

pub type AlertReceiver = mpsc::Receiver<Alert>;

#[must_use]
pub fn alert_channel() -> (AlertSender, AlertReceiver) {
    let (tx, rx) = mpsc::channel(ALERT_QUEUE_CAPACITY);
    (AlertSender { tx }, rx)
}

impl AlertSender {
    /// Deliver an alert without waiting. A full queue or a dropped receiver
    /// discards it.
    pub fn raise(&self, kind: AlertKind, message: impl Into<String>) {
        match self.tx.try_send(Alert { kind, message: message.into() }) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            Err(TrySendError::Full(alert)) => {
                debug!(kind = ?alert.kind, "alert queue full; dropping alert");
            }
        }
    }
}

/// Message shown when the push channel fails, naming the retry delay.
#[must_use]
pub fn transport_failed_message(delay: std::time::Duration) -> String {
    let secs = delay.as_secs_f64();
    if delay.subsec_millis() == 0 {
        format!("WebSocket connection failed. Retrying in {} seconds...", delay.as_secs())
    } else {
        format!("WebSocket connection failed. Retrying in {secs:.1} seconds...")
    }
}

#[cfg(test)]
#[path = "alert_test.rs"]
mod tests;
