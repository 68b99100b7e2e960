use crate::helper::*;
use call_detector::DestinationFilter;
use chrono::Duration;
use harborwatch_core::{VesselState, Zone};

#[test]
fn test_alias_matches_as_substring_case_insensitively() {
    let filter = DestinationFilter::new(["BERBERA"]);

    assert!(filter.matches(Some("BERBERA ANCHORAGE")));
    assert!(filter.matches(Some("berbera")));
    assert!(filter.matches(Some("SO BERBERA PORT")));
    assert!(!filter.matches(Some("MOGADISHU")));
    assert!(!filter.matches(None));
}

#[test]
fn test_irrelevant_destination_classifies_as_open_water_despite_coordinates() {
    let detector = detector();
    let mmsi = mmsi();
    let t0 = t0();

    let mut inside_port = report(mmsi, t0, PORT, 0.2);
    inside_port.destination = Some("MOGADISHU".to_string());

    let state = VesselState::unknown(mmsi);
    assert_eq!(detector.classify(&state, &inside_port), Zone::OpenWater);
}

#[test]
fn test_stale_destination_does_not_force_a_departure() {
    let detector = detector();
    let mmsi = mmsi();
    let t0 = t0();

    let mut state = VesselState::unknown(mmsi);
    state.zone = Zone::Port;
    state.zone_entered_at = Some(t0 - Duration::hours(10));
    state.last_seen = Some(t0 - Duration::minutes(5));

    // Alongside with destination text already set for the next leg.
    let mut alongside = report(mmsi, t0, PORT, 0.1);
    alongside.destination = Some("DJIBOUTI".to_string());

    assert_eq!(detector.classify(&state, &alongside), Zone::Port);
}
