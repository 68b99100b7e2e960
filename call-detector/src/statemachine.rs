use chrono::{DateTime, Duration, Utc};
use harborwatch_core::{NewPortCall, PortCall, PortCallEvent, VesselCommit, VesselState, Zone};
use tracing::warn;

/// Thresholds for committing zone transitions and closing stale calls.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Consecutive reports in a new zone required to commit the change.
    pub confirmation_reports: u32,
    /// Committing alternative: the new zone has persisted this long.
    pub min_dwell: Duration,
    /// An open call whose vessel has been silent longer than this is
    /// closed at its last seen timestamp, marked inferred.
    pub max_open_call_age: Duration,
    /// A report inside the port polygon only supports a berthing
    /// confirmation below this speed over ground (knots), unless the
    /// vessel reports itself moored.
    pub berth_max_sog: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            confirmation_reports: 2,
            min_dwell: Duration::minutes(10),
            max_open_call_age: Duration::days(14),
            berth_max_sog: 1.0,
        }
    }
}

/// Per-vessel transition engine over time-ordered classified positions.
///
/// Consumes one vessel's reports and turns confirmed zone changes into
/// port-call record operations. A zone change is only committed once the
/// configured number of consecutive reports support it, or once the new
/// zone has persisted for the minimum dwell, whichever comes first; a
/// single noisy position near a boundary therefore never produces a call.
///
/// The caller owns report ordering: positions must be fed in ascending
/// timestamp order.
#[derive(Debug)]
pub struct CallStatemachine<'a> {
    config: &'a DetectorConfig,
    state: VesselState,
    open_call: Option<PortCall>,
    events: Vec<PortCallEvent>,
}

impl<'a> CallStatemachine<'a> {
    pub fn new(
        config: &'a DetectorConfig,
        state: VesselState,
        open_call: Option<PortCall>,
    ) -> CallStatemachine<'a> {
        CallStatemachine {
            config,
            state,
            open_call,
            events: vec![],
        }
    }

    pub fn state(&self) -> &VesselState {
        &self.state
    }

    pub fn advance(&mut self, timestamp: DateTime<Utc>, zone: Zone) {
        if zone == self.state.zone {
            self.state.clear_pending();
        } else {
            match self.state.pending_zone {
                Some(pending) if pending == zone => self.state.pending_reports += 1,
                _ => {
                    self.state.pending_zone = Some(zone);
                    self.state.pending_reports = 1;
                    // The dwell clock starts at the last report that still
                    // supported another zone: with sparse sampling the
                    // vessel may have sat in the new zone for the whole gap.
                    self.state.pending_since = Some(self.state.last_seen.unwrap_or(timestamp));
                }
            }

            let dwelled = self
                .state
                .pending_since
                .is_some_and(|since| timestamp - since >= self.config.min_dwell);

            if self.state.pending_reports >= self.config.confirmation_reports || dwelled {
                self.commit(timestamp, zone);
            }
        }

        self.state.last_seen = Some(timestamp);
    }

    /// Applies the timeout rule for stale open calls and returns the
    /// vessel's outcome for persistence.
    pub fn finalize(mut self, now: DateTime<Utc>) -> VesselCommit {
        if let (Some(call), Some(last_seen)) = (&self.open_call, self.state.last_seen) {
            if call.is_open() && now - last_seen > self.config.max_open_call_age {
                self.events.push(PortCallEvent::Closed {
                    mmsi: self.state.mmsi,
                    departure_at: last_seen,
                    inferred: true,
                });
                self.open_call = None;
                // The vessel is presumed gone; a reappearance alongside
                // must open a fresh call.
                self.state.zone = Zone::OpenWater;
                self.state.zone_entered_at = None;
                self.state.clear_pending();
            }
        }

        VesselCommit {
            state: self.state,
            events: self.events,
        }
    }

    fn commit(&mut self, timestamp: DateTime<Utc>, zone: Zone) {
        match (self.state.zone, zone) {
            (Zone::Anchorage, Zone::Port) => {
                let waiting_minutes = self
                    .state
                    .zone_entered_at
                    .map(|entered| whole_minutes(timestamp - entered))
                    .unwrap_or(0);
                self.open(timestamp, waiting_minutes);
            }
            (Zone::OpenWater, Zone::Port) => self.open(timestamp, 0),
            (Zone::Port, Zone::Anchorage | Zone::OpenWater) => self.close(timestamp),
            // Queue entry and abandonment change no records, only state.
            (Zone::OpenWater, Zone::Anchorage) | (Zone::Anchorage, Zone::OpenWater) => {}
            (Zone::OpenWater, Zone::OpenWater)
            | (Zone::Anchorage, Zone::Anchorage)
            | (Zone::Port, Zone::Port) => {}
        }

        self.state.zone = zone;
        self.state.zone_entered_at = Some(timestamp);
        self.state.clear_pending();
    }

    fn open(&mut self, arrival_at: DateTime<Utc>, waiting_minutes: i32) {
        if self.open_call.is_some() {
            warn!(
                "confirmed arrival for vessel {} which already has an open call, skipping",
                self.state.mmsi
            );
            return;
        }

        self.events.push(PortCallEvent::Opened(NewPortCall {
            mmsi: self.state.mmsi,
            arrival_at,
            waiting_minutes,
        }));
        self.open_call = Some(PortCall {
            mmsi: self.state.mmsi,
            arrival_at,
            departure_at: None,
            waiting_minutes,
            departure_inferred: false,
        });
    }

    fn close(&mut self, departure_at: DateTime<Utc>) {
        match self.open_call.take() {
            Some(_) => self.events.push(PortCallEvent::Closed {
                mmsi: self.state.mmsi,
                departure_at,
                inferred: false,
            }),
            None => warn!(
                "confirmed departure for vessel {} without an open call, skipping",
                self.state.mmsi
            ),
        }
    }
}

fn whole_minutes(duration: Duration) -> i32 {
    let minutes = (duration.num_seconds() as f64 / 60.0).round() as i32;
    minutes.max(0)
}
