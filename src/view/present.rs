//! Presentation model — what a map and a table need from a filtered fleet.
//!
//! DESIGN
//! ======
//! Markers are only produced for validated coordinates; table rows are
//! produced for every filtered robot and format whatever `location` holds.
//! Timestamps stay strings in the store and are parsed here, so a bad
//! timestamp only ever costs one cell.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use super::filter::{FilterSelector, filter};
use crate::state::{FleetState, RobotRecord, RobotStatus};

pub const INVALID_DATE: &str = "Invalid Date";
pub const MISSING_LOCATION: &str = "—";

/// One map pin.
#[derive(Clone, Debug, PartialEq)]
pub struct MapMarker {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: RobotStatus,
    pub battery: f64,
}

/// One table line, already formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub status: String,
    pub battery: String,
    pub cpu: String,
    pub ram: String,
    pub last_updated: String,
    pub location: String,
}

/// Everything the presentation surface renders for one (fleet, selector) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct FleetView {
    pub selector: FilterSelector,
    pub total: usize,
    pub revision: u64,
    pub markers: Vec<MapMarker>,
    pub rows: Vec<TableRow>,
}

impl FleetView {
    #[must_use]
    pub fn build(state: &FleetState, selector: FilterSelector) -> Self {
        let visible = filter(state, selector);
        Self {
            selector,
            total: state.len(),
            revision: state.revision,
            markers: visible.clone().filter_map(MapMarker::from_record).collect(),
            rows: visible.map(TableRow::from_record).collect(),
        }
    }
}

impl MapMarker {
    #[must_use]
    pub fn from_record(robot: &RobotRecord) -> Option<Self> {
        let (latitude, longitude) = robot.coordinates()?;
        Some(Self {
            id: robot.id.clone(),
            latitude,
            longitude,
            status: robot.status,
            battery: robot.battery,
        })
    }
}

impl TableRow {
    #[must_use]
    pub fn from_record(robot: &RobotRecord) -> Self {
        Self {
            id: robot.id.clone(),
            status: robot.status.to_string(),
            battery: format!("{}%", robot.battery),
            cpu: format!("{}%", robot.cpu),
            ram: robot.ram.to_string(),
            last_updated: format_timestamp(&robot.last_updated),
            location: format_location(robot.location.as_ref()),
        }
    }
}

/// Render a wire timestamp as `YYYY-MM-DD HH:MM:SS` in UTC.
///
/// Accepts RFC 3339, or an ISO 8601 timestamp without offset (taken as UTC).
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    let display = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    parse_timestamp(raw)
        .and_then(|at| at.to_offset(UtcOffset::UTC).format(display).ok())
        .unwrap_or_else(|| INVALID_DATE.to_owned())
}

fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(at);
    }
    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
    PrimitiveDateTime::parse(raw, naive).ok().map(PrimitiveDateTime::assume_utc)
}

/// Best-effort location cell: numbers to two decimals, anything else raw.
#[must_use]
pub fn format_location(location: Option<&Value>) -> String {
    match location {
        None | Some(Value::Null) => MISSING_LOCATION.to_owned(),
        Some(Value::Array(items)) if items.is_empty() => MISSING_LOCATION.to_owned(),
        Some(Value::Array(items)) => items.iter().map(format_coordinate).collect::<Vec<_>>().join(", "),
        Some(other) => other.to_string(),
    }
}

fn format_coordinate(value: &Value) -> String {
    value.as_f64().map_or_else(|| value.to_string(), |n| format!("{n:.2}"))
}

#[cfg(test)]
#[path = "present_test.rs"]
mod tests;
