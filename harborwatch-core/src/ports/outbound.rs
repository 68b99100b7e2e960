use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{DateRange, Geofence, Mmsi, PortCall, PositionMessage, Result, VesselState};

/// Everything a detection run reads. All reads happen at the partition
/// boundary, before the per-report loop starts.
#[async_trait]
pub trait DetectionOutboundPort: Send + Sync {
    async fn geofences(&self) -> Result<Vec<Geofence>>;
    /// Timestamp boundary of the last successfully processed report.
    async fn watermark(&self) -> Result<Option<DateTime<Utc>>>;
    /// All raw feed rows strictly after the watermark, any vessel order.
    async fn position_messages(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PositionMessage>>;
    async fn vessel_state(&self, mmsi: Mmsi) -> Result<Option<VesselState>>;
    /// States of all tracked vessels, open-call holders included.
    async fn vessel_states(&self) -> Result<Vec<VesselState>>;
    async fn open_port_call(&self, mmsi: Mmsi) -> Result<Option<PortCall>>;
}

#[async_trait]
pub trait KpiOutboundPort: Send + Sync {
    /// Calls with arrival or departure inside the range, open calls included.
    async fn port_calls(&self, range: &DateRange) -> Result<Vec<PortCall>>;
    async fn vessel_states(&self) -> Result<Vec<VesselState>>;
}
