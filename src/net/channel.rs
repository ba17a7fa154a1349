//! Live update channel — always-reconnecting push connection.
//!
//! DESIGN
//! ======
//! One spawned task owns the `FleetStore` for the rest of the session and
//! cycles `Connecting → Open → {Closed, Errored} → (delay) → Connecting`.
//! Every inbound payload is a complete fleet; it replaces the store in one
//! step. Payloads that fail to parse are dropped and the previous fleet
//! stays published.
//!
//! LIFECYCLE
//! =========
//! Both the open connection and the reconnect delay race a shutdown signal
//! (biased toward shutdown). `ChannelHandle::teardown` raises the signal and
//! awaits the task, so once it returns the connection has been dropped, no
//! reconnect timer is pending, and the store can no longer change. Dropping
//! the handle raises the same signal without waiting.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::transport::{ChannelError, PushTransport};
use crate::alert::{AlertKind, AlertSender, transport_failed_message};
use crate::state::{FleetStore, parse_fleet};

/// Observable lifecycle of the push connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelStatus {
    #[default]
    Connecting,
    Open,
    /// Connection closed; a reconnect is scheduled.
    Closed,
    /// Connection failed; a reconnect is scheduled.
    Errored,
    /// Torn down; terminal.
    Stopped,
}

/// How one connection ended.
#[derive(Debug, PartialEq, Eq)]
enum ConnectionEnd {
    Closed,
    Failed(ChannelError),
}

struct LiveChannel<T> {
    transport: T,
    store: FleetStore,
    reconnect_delay: Duration,
    alerts: AlertSender,
    status: watch::Sender<ChannelStatus>,
}

/// Owner-side handle on a running channel.
#[derive(Debug)]
pub struct ChannelHandle {
    shutdown: watch::Sender<bool>,
    status: watch::Receiver<ChannelStatus>,
    task: JoinHandle<()>,
}

/// Start the channel. The store must already hold the snapshot (or be empty).
pub fn spawn_live_channel<T: PushTransport>(
    transport: T,
    store: FleetStore,
    reconnect_delay: Duration,
    alerts: AlertSender,
) -> ChannelHandle {
    let (shutdown, shutdown_rx) = watch::channel(false);
    let (status_tx, status) = watch::channel(ChannelStatus::Connecting);

    let channel = LiveChannel { transport, store, reconnect_delay, alerts, status: status_tx };
    let task = tokio::spawn(channel.run(shutdown_rx));

    ChannelHandle { shutdown, status, task }
}

impl ChannelHandle {
    #[must_use]
    pub fn status(&self) -> watch::Receiver<ChannelStatus> {
        self.status.clone()
    }

    /// Close the connection, cancel any pending reconnect, and wait for the
    /// task to finish.
    pub async fn teardown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "push channel task ended abnormally");
        }
    }
}

impl<T: PushTransport> LiveChannel<T> {
    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let delay_ms = u64::try_from(self.reconnect_delay.as_millis()).unwrap_or(u64::MAX);

        loop {
            self.set_status(ChannelStatus::Connecting);

            let end = tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                end = self.connect_and_pump() => end,
            };

            match end {
                ConnectionEnd::Closed => {
                    info!(delay_ms, "push channel closed; reconnecting after delay");
                    self.set_status(ChannelStatus::Closed);
                }
                ConnectionEnd::Failed(error) => {
                    warn!(error = %error, delay_ms, "push channel error; reconnecting after delay");
                    self.alerts
                        .raise(AlertKind::ChannelTransportError, transport_failed_message(self.reconnect_delay));
                    self.set_status(ChannelStatus::Errored);
                }
            }

            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                () = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }

        self.set_status(ChannelStatus::Stopped);
        info!("push channel stopped");
    }

    async fn connect_and_pump(&self) -> ConnectionEnd {
        let mut payloads = match self.transport.connect().await {
            Ok(stream) => stream,
            Err(error) => return ConnectionEnd::Failed(error),
        };

        self.set_status(ChannelStatus::Open);
        info!("push channel open");

        while let Some(item) = payloads.next().await {
            match item {
                Ok(text) => self.apply_payload(&text),
                Err(error) => return ConnectionEnd::Failed(error),
            }
        }

        ConnectionEnd::Closed
    }

    fn apply_payload(&self, text: &str) {
        match parse_fleet(text) {
            Ok(robots) => {
                let count = robots.len();
                self.store.replace_from_push(robots);
                debug!(count, revision = self.store.current().revision, "fleet replaced from push");
            }
            Err(e) => {
                // EDGE: keep the previous fleet; the next good payload supersedes it.
                warn!(error = %e, bytes = text.len(), "dropping malformed push payload");
            }
        }
    }

    fn set_status(&self, status: ChannelStatus) {
        self.status.send_replace(status);
    }
}

#[cfg(test)]
#[path = "channel_test.rs"]
mod tests;
