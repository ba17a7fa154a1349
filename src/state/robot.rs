//! Robot record — the per-robot telemetry row pushed by the fleet server.
//!
//! DESIGN
//! ======
//! Numeric telemetry and status are strongly typed, so a payload with a bad
//! status or non-numeric battery fails to parse as a whole. `location` is
//! kept as the raw JSON value: malformed shapes must survive parsing so the
//! table can still show them, while the map asks for `coordinates()` and only
//! ever sees a validated pair.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Battery percentage strictly below which a robot counts as low battery.
pub const LOW_BATTERY_THRESHOLD: f64 = 20.0;

/// Reported connectivity of a robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotStatus {
    Online,
    Offline,
}

impl RobotStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

impl std::fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One robot as reported by the snapshot endpoint or a push message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RobotRecord {
    /// Stable identity key.
    pub id: String,
    pub status: RobotStatus,
    /// Percentage in `[0, 100]`.
    pub battery: f64,
    /// Percentage; not range-checked.
    pub cpu: f64,
    /// Megabytes.
    pub ram: f64,
    /// Serialized timestamp, parsed only when presented.
    pub last_updated: String,
    /// Raw `[lat, lon]` as received. See [`RobotRecord::coordinates`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
}

impl RobotRecord {
    /// Latitude/longitude pair, if `location` is exactly two numbers.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let Some(Value::Array(items)) = &self.location else {
            return None;
        };
        let [lat, lon] = items.as_slice() else {
            return None;
        };
        Some((lat.as_f64()?, lon.as_f64()?))
    }

    #[must_use]
    pub fn is_low_battery(&self) -> bool {
        self.battery < LOW_BATTERY_THRESHOLD
    }
}

/// Parse a JSON array of robot records, as sent by both fleet endpoints.
///
/// # Errors
///
/// Returns the `serde_json` error when the body is not an array of
/// well-formed records.
pub fn parse_fleet(body: &str) -> Result<Vec<RobotRecord>, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
#[path = "robot_test.rs"]
mod tests;
