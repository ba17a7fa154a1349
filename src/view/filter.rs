//! View filter — pure projection of the fleet by selector.

use std::str::FromStr;

use crate::state::{FleetState, RobotRecord, RobotStatus};

/// Named predicate choice for the presentation subset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterSelector {
    #[default]
    All,
    Online,
    Offline,
    LowBattery,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter `{0}` (expected all, online, offline or low-battery)")]
pub struct UnknownSelector(pub String);

impl FilterSelector {
    pub const ALL: [Self; 4] = [Self::All, Self::Online, Self::Offline, Self::LowBattery];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Online => "online",
            Self::Offline => "offline",
            Self::LowBattery => "low-battery",
        }
    }

    #[must_use]
    pub fn matches(self, robot: &RobotRecord) -> bool {
        match self {
            Self::All => true,
            Self::Online => robot.status == RobotStatus::Online,
            Self::Offline => robot.status == RobotStatus::Offline,
            Self::LowBattery => robot.is_low_battery(),
        }
    }
}

impl std::fmt::Display for FilterSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterSelector {
    type Err = UnknownSelector;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|selector| selector.as_str() == wanted)
            .ok_or_else(|| UnknownSelector(raw.trim().to_owned()))
    }
}

/// Robots in `state` matching `selector`, in source order.
///
/// The iterator borrows the state and is `Clone`, so callers can walk the
/// same projection more than once without collecting it.
pub fn filter(state: &FleetState, selector: FilterSelector) -> impl Iterator<Item = &RobotRecord> + Clone {
    state.robots.iter().filter(move |robot| selector.matches(robot))
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
