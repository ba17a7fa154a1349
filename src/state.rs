//! Client-side fleet state.
//!
//! DESIGN
//! ======
//! `robot` holds the wire record and its validation helpers. `fleet` holds
//! the single-writer container the snapshot loader and live channel publish
//! into, and the watch handle every reader subscribes with.

pub mod fleet;
pub mod robot;

pub use fleet::{FleetState, FleetStore, FleetWatch, StateOrigin};
pub use robot::{LOW_BATTERY_THRESHOLD, RobotRecord, RobotStatus, parse_fleet};
