//! Live robot fleet monitor.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client takes one bulk snapshot of the fleet, then keeps it current
//! from a push channel that delivers the complete fleet on every message and
//! reconnects forever at a fixed delay. Presentation reads the fleet through
//! a watch handle and derives filtered views without writing back.
//!
//! - `state`: robot records and the single-writer fleet store
//! - `net`: snapshot loader, push transport, live channel
//! - `view`: selector filter, map/table model, terminal rendering
//! - `client`: snapshot → channel composition and teardown
//! - `dashboard`: terminal render loop and selector input
//! - `simulator`: a stand-in fleet server for demos and tests

pub mod alert;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod net;
pub mod simulator;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_helpers;
