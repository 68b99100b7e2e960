use chrono::{DateTime, Utc};
use harborwatch_core::{
    Geofence, NavigationStatus, PortCall, PositionReport, Result, VesselCommit, VesselState, Zone,
};

use crate::{CallStatemachine, DestinationFilter, DetectorConfig, ZoneMatcher};

/// The full per-vessel detection pipeline: destination gating, zone
/// classification, berthing corroboration, and the transition engine.
pub struct CallDetector {
    config: DetectorConfig,
    matcher: ZoneMatcher,
    filter: DestinationFilter,
}

impl CallDetector {
    /// Fails fast on invalid geofence geometry; no detection runs against
    /// a broken zone set.
    pub fn new(
        config: DetectorConfig,
        geofences: Vec<Geofence>,
        filter: DestinationFilter,
    ) -> Result<CallDetector> {
        Ok(CallDetector {
            config,
            matcher: ZoneMatcher::new(geofences)?,
            filter,
        })
    }

    /// Runs one vessel's reports, in ascending timestamp order, against its
    /// persisted state and returns the commit for this vessel.
    pub fn detect(
        &self,
        state: VesselState,
        open_call: Option<PortCall>,
        reports: &[PositionReport],
        now: DateTime<Utc>,
    ) -> VesselCommit {
        let mut statemachine = CallStatemachine::new(&self.config, state, open_call);

        for report in reports {
            // Reports up to and including the persisted last-seen timestamp
            // were already committed by an earlier (possibly partially
            // failed) run; replaying them must not re-trigger transitions.
            if statemachine
                .state()
                .last_seen
                .is_some_and(|seen| report.msgtime <= seen)
            {
                continue;
            }

            let zone = self.classify(statemachine.state(), report);
            statemachine.advance(report.msgtime, zone);
        }

        statemachine.finalize(now)
    }

    /// Spatial classification of a single report given the vessel's
    /// confirmed state.
    ///
    /// The destination filter only gates vessels confirmed in open water:
    /// it exists to cut irrelevant passing traffic before containment
    /// testing, and a vessel already queued or alongside frequently carries
    /// stale destination text, so text evidence alone must never push a
    /// vessel out of a zone.
    pub fn classify(&self, state: &VesselState, report: &PositionReport) -> Zone {
        if state.zone == Zone::OpenWater && !self.filter.matches(report.destination.as_deref()) {
            return Zone::OpenWater;
        }

        let zone = self.matcher.classify(report.coordinates());

        // A vessel crossing the port polygon at speed is transiting, not
        // berthing; such reports support no zone change.
        if zone == Zone::Port && state.zone != Zone::Port && !self.berthed_like(report) {
            return state.zone;
        }

        zone
    }

    fn berthed_like(&self, report: &PositionReport) -> bool {
        report.navigational_status == Some(NavigationStatus::Moored)
            || report
                .speed_over_ground
                .is_some_and(|sog| sog < self.config.berth_max_sog)
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}
