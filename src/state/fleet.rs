//! Fleet state container — single writer, many readers.
//!
//! DESIGN
//! ======
//! `FleetStore` is the only handle that can replace the fleet. It is not
//! `Clone`: the snapshot installs through it once, then it is moved into the
//! live channel task, which owns it for the rest of the session. Readers hold
//! a `FleetWatch`, a `tokio::sync::watch` receiver over `Arc<FleetState>`, so
//! every replacement is a single pointer swap and a reader can never observe
//! half of one payload and half of another.

use std::sync::Arc;

use tokio::sync::watch;

use super::robot::RobotRecord;

/// Which write produced the current fleet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateOrigin {
    /// Nothing installed yet, or the snapshot failed.
    Empty,
    Snapshot,
    Push,
}

/// Immutable published view of the whole fleet.
#[derive(Clone, Debug, PartialEq)]
pub struct FleetState {
    pub robots: Vec<RobotRecord>,
    pub origin: StateOrigin,
    /// Bumped on every replacement; 0 for the initial empty state.
    pub revision: u64,
}

impl FleetState {
    #[must_use]
    pub fn empty() -> Self {
        Self { robots: Vec::new(), origin: StateOrigin::Empty, revision: 0 }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.robots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }
}

impl Default for FleetState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Sole writer of the fleet state.
#[derive(Debug)]
pub struct FleetStore {
    tx: watch::Sender<Arc<FleetState>>,
}

impl FleetStore {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(FleetState::empty()));
        Self { tx }
    }

    /// Install the startup snapshot.
    pub fn install_snapshot(&self, robots: Vec<RobotRecord>) {
        self.replace(robots, StateOrigin::Snapshot);
    }

    /// Replace the fleet wholesale with a push payload.
    pub fn replace_from_push(&self, robots: Vec<RobotRecord>) {
        self.replace(robots, StateOrigin::Push);
    }

    fn replace(&self, robots: Vec<RobotRecord>, origin: StateOrigin) {
        self.tx.send_modify(|current| {
            let revision = current.revision + 1;
            *current = Arc::new(FleetState { robots, origin, revision });
        });
    }

    #[must_use]
    pub fn current(&self) -> Arc<FleetState> {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> FleetWatch {
        FleetWatch { rx: self.tx.subscribe() }
    }
}

impl Default for FleetStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only handle on the fleet state.
#[derive(Clone, Debug)]
pub struct FleetWatch {
    rx: watch::Receiver<Arc<FleetState>>,
}

impl FleetWatch {
    /// Latest published fleet, marking it as seen.
    pub fn latest(&mut self) -> Arc<FleetState> {
        self.rx.borrow_and_update().clone()
    }

    /// Latest published fleet without touching the seen marker.
    #[must_use]
    pub fn peek(&self) -> Arc<FleetState> {
        self.rx.borrow().clone()
    }

    /// Wait until a replacement newer than the last one seen is published.
    ///
    /// Returns `false` once the writer is gone and no further changes can
    /// arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
#[path = "fleet_test.rs"]
mod tests;
