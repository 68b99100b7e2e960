use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Mmsi, Zone};

/// Per-vessel detection state, keyed by [`Mmsi`] and persisted between
/// detection runs. This is the sole source of truth for which transitions
/// have already been committed, which is what makes reruns over an already
/// processed window idempotent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VesselState {
    pub mmsi: Mmsi,
    /// Zone the vessel is confirmed to be in.
    pub zone: Zone,
    /// When the confirmed zone was entered, `None` for vessels that have
    /// never been observed inside a geofence.
    pub zone_entered_at: Option<DateTime<Utc>>,
    /// Candidate zone of an uncommitted change.
    pub pending_zone: Option<Zone>,
    /// Consecutive reports supporting the pending zone.
    pub pending_reports: u32,
    /// When the pending zone could first have been entered: the timestamp
    /// of the last report that still supported another zone.
    pub pending_since: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl VesselState {
    /// State for a vessel never seen before: open water, never entered.
    pub fn unknown(mmsi: Mmsi) -> VesselState {
        VesselState {
            mmsi,
            zone: Zone::OpenWater,
            zone_entered_at: None,
            pending_zone: None,
            pending_reports: 0,
            pending_since: None,
            last_seen: None,
        }
    }

    pub fn clear_pending(&mut self) {
        self.pending_zone = None;
        self.pending_reports = 0;
        self.pending_since = None;
    }
}

/// A completed or ongoing visit alongside. At most one call per vessel is
/// open (`departure_at == None`) at any time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PortCall {
    pub mmsi: Mmsi,
    pub arrival_at: DateTime<Utc>,
    pub departure_at: Option<DateTime<Utc>>,
    /// Whole minutes spent confirmed in the anchorage immediately before
    /// arrival, zero when the vessel berthed without queueing.
    pub waiting_minutes: i32,
    /// Set when the call was closed by the stale-call timeout rule rather
    /// than an observed departure.
    pub departure_inferred: bool,
}

impl PortCall {
    pub fn is_open(&self) -> bool {
        self.departure_at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPortCall {
    pub mmsi: Mmsi,
    pub arrival_at: DateTime<Utc>,
    pub waiting_minutes: i32,
}

/// Port-call record operation emitted by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum PortCallEvent {
    Opened(NewPortCall),
    Closed {
        mmsi: Mmsi,
        departure_at: DateTime<Utc>,
        inferred: bool,
    },
}

/// Everything the state machine produced for one vessel. Persisted
/// atomically per vessel so that concurrent runs can never interleave a
/// partial transition commit.
#[derive(Debug, Clone)]
pub struct VesselCommit {
    pub state: VesselState,
    pub events: Vec<PortCallEvent>,
}

impl VesselCommit {
    pub fn mmsi(&self) -> Mmsi {
        self.state.mmsi
    }
}

#[cfg(feature = "test")]
mod test {
    use super::*;

    impl PortCall {
        pub fn test_open(mmsi: Mmsi, arrival_at: DateTime<Utc>) -> PortCall {
            PortCall {
                mmsi,
                arrival_at,
                departure_at: None,
                waiting_minutes: 0,
                departure_inferred: false,
            }
        }
    }
}
