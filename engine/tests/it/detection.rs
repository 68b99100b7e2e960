use crate::helper::*;
use chrono::Duration;
use engine::App;
use harborwatch_core::{Mmsi, PortCall, VesselState, Zone};

#[tokio::test]
async fn test_run_detects_call_and_advances_watermark() {
    let store = InMemoryStore::new();
    let mmsi = Mmsi::test_new(563012345);
    let t0 = t0();

    store.add_messages(vec![
        message(mmsi, t0, OPEN_WATER, 12.0),
        message(mmsi, t0 + Duration::minutes(5), ANCHORAGE, 0.3),
        message(mmsi, t0 + Duration::minutes(95), ANCHORAGE, 0.1),
        message(mmsi, t0 + Duration::minutes(200), PORT, 0.2),
    ]);

    let app = App::build(&settings(), store);
    let outcome = app.run_at(t0 + Duration::minutes(201)).await.unwrap();

    assert_eq!(outcome.vessels_processed, 1);
    assert_eq!(outcome.calls_opened, 1);
    assert_eq!(outcome.calls_closed, 0);
    assert_eq!(outcome.watermark, Some(t0 + Duration::minutes(200)));
}

#[tokio::test]
async fn test_run_outcome_is_persisted() {
    let store = InMemoryStore::new();
    let mmsi = Mmsi::test_new(563012345);
    let t0 = t0();

    store.add_messages(vec![
        message(mmsi, t0, OPEN_WATER, 12.0),
        message(mmsi, t0 + Duration::minutes(5), ANCHORAGE, 0.3),
        message(mmsi, t0 + Duration::minutes(95), ANCHORAGE, 0.1),
        message(mmsi, t0 + Duration::minutes(200), PORT, 0.2),
    ]);

    let app = App::build(&settings(), store);
    app.run_at(t0 + Duration::minutes(201)).await.unwrap();

    let store = app.store();
    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].is_open());
    assert_eq!(calls[0].arrival_at, t0 + Duration::minutes(200));
    assert_eq!(calls[0].waiting_minutes, 105);

    let state = store.state(mmsi).unwrap();
    assert_eq!(state.zone, Zone::Port);
    assert_eq!(state.last_seen, Some(t0 + Duration::minutes(200)));
    assert_eq!(store.stored_watermark(), Some(t0 + Duration::minutes(200)));
}

#[tokio::test]
async fn test_malformed_reports_are_dropped_without_affecting_others() {
    let store = InMemoryStore::new();
    let valid = Mmsi::test_new(563012345);
    let broken = Mmsi::test_new(563099999);
    let t0 = t0();

    let mut missing_coordinates = message(broken, t0 + Duration::minutes(1), PORT, 0.2);
    missing_coordinates.latitude = None;

    store.add_messages(vec![
        message(valid, t0, PORT, 0.2),
        missing_coordinates,
        message(valid, t0 + Duration::minutes(6), PORT, 0.2),
    ]);

    let app = App::build(&settings(), store);
    let outcome = app.run_at(t0 + Duration::minutes(10)).await.unwrap();

    assert_eq!(outcome.vessels_processed, 1);
    assert_eq!(outcome.calls_opened, 1);
    // The malformed report never became part of the processed window.
    assert_eq!(outcome.watermark, Some(t0 + Duration::minutes(6)));
    assert!(app.store().state(broken).is_none());
}

#[tokio::test]
async fn test_retried_window_creates_no_duplicate_calls() {
    let store = InMemoryStore::new();
    let mmsi = Mmsi::test_new(563012345);
    let t0 = t0();

    store.add_messages(vec![
        message(mmsi, t0, OPEN_WATER, 12.0),
        message(mmsi, t0 + Duration::minutes(5), ANCHORAGE, 0.3),
        message(mmsi, t0 + Duration::minutes(95), ANCHORAGE, 0.1),
        message(mmsi, t0 + Duration::minutes(200), PORT, 0.2),
    ]);

    let app = App::build(&settings(), store);
    let now = t0 + Duration::minutes(201);

    app.run_at(now).await.unwrap();
    let calls_after_first = app.store().calls();

    // A retried job re-reads from the pre-run watermark.
    app.store().reset_watermark(None);
    app.run_at(now).await.unwrap();

    assert_eq!(app.store().calls(), calls_after_first);
}

#[tokio::test]
async fn test_failed_commit_does_not_advance_watermark() {
    let store = InMemoryStore::failing_commits();
    let mmsi = Mmsi::test_new(563012345);
    let t0 = t0();

    store.add_messages(vec![
        message(mmsi, t0, PORT, 0.2),
        message(mmsi, t0 + Duration::minutes(6), PORT, 0.2),
    ]);

    let app = App::build(&settings(), store);
    let result = app.run_at(t0 + Duration::minutes(10)).await;

    assert!(result.is_err());
    assert_eq!(app.store().stored_watermark(), None);
    assert!(app.store().calls().is_empty());
}

#[tokio::test]
async fn test_silent_vessel_with_open_call_is_closed_by_timeout() {
    let store = InMemoryStore::new();
    let mmsi = Mmsi::test_new(563012345);
    let t0 = t0();

    let mut state = VesselState::unknown(mmsi);
    state.zone = Zone::Port;
    state.zone_entered_at = Some(t0);
    state.last_seen = Some(t0 + Duration::hours(2));
    store.put_state(state);
    store.add_call(PortCall::test_open(mmsi, t0));

    let app = App::build(&settings(), store);
    let outcome = app.run_at(t0 + Duration::days(15)).await.unwrap();

    assert_eq!(outcome.calls_closed, 1);

    let calls = app.store().calls();
    assert_eq!(calls[0].departure_at, Some(t0 + Duration::hours(2)));
    assert!(calls[0].departure_inferred);
}

#[tokio::test]
async fn test_prune_drops_stale_states_but_keeps_open_call_holders() {
    let mut settings = settings();
    settings.detection.state_retention = std::time::Duration::from_secs(7 * 24 * 60 * 60);

    let store = InMemoryStore::new();
    let t0 = t0();

    let stale = Mmsi::test_new(563000001);
    let mut stale_state = VesselState::unknown(stale);
    stale_state.last_seen = Some(t0 - Duration::days(10));
    store.put_state(stale_state);

    let alongside = Mmsi::test_new(563000002);
    let mut alongside_state = VesselState::unknown(alongside);
    alongside_state.zone = Zone::Port;
    alongside_state.zone_entered_at = Some(t0 - Duration::days(10));
    alongside_state.last_seen = Some(t0 - Duration::days(10));
    store.put_state(alongside_state);
    store.add_call(PortCall::test_open(alongside, t0 - Duration::days(10)));

    let recent = Mmsi::test_new(563000003);
    let mut recent_state = VesselState::unknown(recent);
    recent_state.last_seen = Some(t0 - Duration::days(1));
    store.put_state(recent_state);

    let app = App::build(&settings, store);
    app.run_at(t0).await.unwrap();

    let store = app.store();
    assert!(store.state(stale).is_none());
    assert!(store.state(alongside).is_some());
    assert!(store.state(recent).is_some());
}

#[tokio::test]
async fn test_vessel_partitions_are_processed_independently() {
    let store = InMemoryStore::new();
    let berthing = Mmsi::test_new(563012345);
    let passing = Mmsi::test_new(563054321);
    let t0 = t0();

    // Interleaved arrival order across vessels, unordered within one.
    store.add_messages(vec![
        message(berthing, t0 + Duration::minutes(11), PORT, 0.2),
        message(passing, t0, OPEN_WATER, 14.0),
        message(berthing, t0 + Duration::minutes(5), PORT, 0.4),
        message(passing, t0 + Duration::minutes(7), OPEN_WATER, 14.2),
        message(berthing, t0, OPEN_WATER, 11.0),
    ]);

    let app = App::build(&settings(), store);
    let outcome = app.run_at(t0 + Duration::minutes(20)).await.unwrap();

    assert_eq!(outcome.calls_opened, 1);

    let store = app.store();
    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].mmsi, berthing);
    assert_eq!(store.state(passing).unwrap().zone, Zone::OpenWater);
}
