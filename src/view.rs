//! Derived, read-only views of the fleet for presentation.

pub mod filter;
pub mod present;
pub mod terminal;

pub use filter::{FilterSelector, UnknownSelector, filter};
pub use present::{FleetView, MapMarker, TableRow};
