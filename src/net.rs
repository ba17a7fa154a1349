//! Network side of the client: the startup snapshot and the live push channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `snapshot` runs once and writes the store before anything else can.
//! `channel` then takes ownership of the store and keeps it current through
//! a `transport::PushTransport`, reconnecting forever at a fixed delay.

pub mod channel;
pub mod snapshot;
pub mod transport;

pub use channel::{ChannelHandle, ChannelStatus, spawn_live_channel};
pub use snapshot::{SnapshotError, SnapshotLoader};
pub use transport::{ChannelError, PushStream, PushTransport, WsTransport};
