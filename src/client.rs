//! Client lifecycle — snapshot first, then the live channel.
//!
//! LIFECYCLE
//! =========
//! 1. Create an empty store.
//! 2. Fetch the snapshot and install it (or alert and stay empty).
//! 3. Move the store into the live channel task, which owns it from then on.
//! 4. `FleetSession::shutdown` tears the channel down.
//!
//! The snapshot completes before the channel is spawned, so a slow snapshot
//! response can never overwrite a newer push.

use tokio::sync::watch;
use tracing::info;

use crate::alert::AlertSender;
use crate::config::{ClientConfig, ConfigError};
use crate::net::snapshot::report_failure;
use crate::net::{ChannelHandle, ChannelStatus, PushTransport, SnapshotLoader, WsTransport, spawn_live_channel};
use crate::state::{FleetStore, FleetWatch};

/// A running client: read-only fleet access plus the channel it came from.
#[derive(Debug)]
pub struct FleetSession {
    fleet: FleetWatch,
    channel: ChannelHandle,
}

impl FleetSession {
    #[must_use]
    pub fn fleet(&self) -> FleetWatch {
        self.fleet.clone()
    }

    #[must_use]
    pub fn channel_status(&self) -> watch::Receiver<ChannelStatus> {
        self.channel.status()
    }

    /// Close the push connection and cancel any pending reconnect.
    pub async fn shutdown(self) {
        self.channel.teardown().await;
        info!("fleet session shut down");
    }
}

/// Start a session against the WebSocket push endpoint derived from `config`.
///
/// # Errors
///
/// Returns [`ConfigError`] when the base URL cannot be turned into a push URL.
pub async fn start(config: &ClientConfig, alerts: AlertSender) -> Result<FleetSession, ConfigError> {
    let transport = WsTransport::from_config(config)?;
    Ok(start_with_transport(config, transport, alerts).await)
}

/// Start a session over an arbitrary push transport.
pub async fn start_with_transport<T: PushTransport>(
    config: &ClientConfig,
    transport: T,
    alerts: AlertSender,
) -> FleetSession {
    let store = FleetStore::new();

    match SnapshotLoader::new(config) {
        Ok(loader) => {
            loader.load_into(&store, &alerts).await;
        }
        Err(e) => report_failure(&e, &alerts),
    }

    let fleet = store.subscribe();
    let channel = spawn_live_channel(transport, store, config.reconnect_delay, alerts);
    FleetSession { fleet, channel }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
