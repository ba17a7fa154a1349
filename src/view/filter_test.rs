use super::*;
use crate::state::StateOrigin;
use crate::test_helpers::robot;

fn fleet(robots: Vec<RobotRecord>) -> FleetState {
    FleetState { robots, origin: StateOrigin::Push, revision: 1 }
}

fn ids<'a>(robots: impl Iterator<Item = &'a RobotRecord>) -> Vec<&'a str> {
    robots.map(|r| r.id.as_str()).collect()
}

fn mixed_fleet() -> FleetState {
    fleet(vec![
        robot("on-1", RobotStatus::Online, 80.0),
        robot("off-1", RobotStatus::Offline, 12.0),
        robot("on-2", RobotStatus::Online, 19.5),
        robot("on-3", RobotStatus::Online, 20.0),
    ])
}

// =============================================================================
// filter
// =============================================================================

#[test]
fn all_passes_everything_through_in_order() {
    let state = mixed_fleet();
    assert_eq!(ids(filter(&state, FilterSelector::All)), vec!["on-1", "off-1", "on-2", "on-3"]);
}

#[test]
fn online_keeps_online_records_in_relative_order() {
    let state = fleet(vec![
        robot("a", RobotStatus::Online, 50.0),
        robot("b", RobotStatus::Offline, 50.0),
        robot("c", RobotStatus::Online, 50.0),
    ]);
    assert_eq!(ids(filter(&state, FilterSelector::Online)), vec!["a", "c"]);
}

#[test]
fn offline_keeps_only_offline_records() {
    let state = mixed_fleet();
    assert_eq!(ids(filter(&state, FilterSelector::Offline)), vec!["off-1"]);
}

#[test]
fn low_battery_uses_strict_threshold() {
    let state = mixed_fleet();
    assert_eq!(ids(filter(&state, FilterSelector::LowBattery)), vec!["off-1", "on-2"]);
}

#[test]
fn low_battery_scenario_single_snapshot_record() {
    let state = fleet(vec![robot("r1", RobotStatus::Online, 15.0)]);
    assert_eq!(ids(filter(&state, FilterSelector::LowBattery)), vec!["r1"]);
}

#[test]
fn every_selector_yields_empty_for_empty_fleet() {
    let state = fleet(Vec::new());
    for selector in FilterSelector::ALL {
        assert_eq!(filter(&state, selector).count(), 0, "{selector}");
    }
}

#[test]
fn filter_is_a_subset_that_matches_predicate() {
    let state = mixed_fleet();
    for selector in FilterSelector::ALL {
        for robot in filter(&state, selector) {
            assert!(selector.matches(robot));
            assert!(state.robots.iter().any(|r| std::ptr::eq(r, robot)));
        }
        let excluded = state.robots.iter().filter(|r| !selector.matches(r)).count();
        assert_eq!(filter(&state, selector).count() + excluded, state.len());
    }
}

#[test]
fn filter_is_restartable_and_leaves_state_untouched() {
    let state = mixed_fleet();
    let before = state.clone();
    let view = filter(&state, FilterSelector::Online);
    let first: Vec<_> = view.clone().collect();
    let second: Vec<_> = view.collect();
    assert_eq!(first, second);
    assert_eq!(state, before);
}

// =============================================================================
// parsing
// =============================================================================

#[test]
fn selector_parses_dashboard_keys() {
    assert_eq!("all".parse::<FilterSelector>(), Ok(FilterSelector::All));
    assert_eq!("online".parse::<FilterSelector>(), Ok(FilterSelector::Online));
    assert_eq!("Offline".parse::<FilterSelector>(), Ok(FilterSelector::Offline));
    assert_eq!(" low-battery\n".parse::<FilterSelector>(), Ok(FilterSelector::LowBattery));
}

#[test]
fn selector_rejects_unknown_key() {
    assert_eq!("charging".parse::<FilterSelector>(), Err(UnknownSelector("charging".to_owned())));
}

#[test]
fn selector_display_round_trips_through_parse() {
    for selector in FilterSelector::ALL {
        assert_eq!(selector.to_string().parse::<FilterSelector>(), Ok(selector));
    }
}

#[test]
fn default_selector_is_all() {
    assert_eq!(FilterSelector::default(), FilterSelector::All);
}
