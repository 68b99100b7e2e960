use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{Result, VesselCommit};

/// Everything a detection run writes.
#[async_trait]
pub trait DetectionInboundPort: Send + Sync {
    /// Persists one vessel's updated state together with its port-call
    /// operations. Must be atomic per vessel: two runs touching the same
    /// vessel may never interleave a partial commit.
    async fn commit_vessel(&self, commit: VesselCommit) -> Result<()>;
    /// Advances the watermark. Called once, after every partition of the
    /// run has committed.
    async fn set_watermark(&self, watermark: DateTime<Utc>) -> Result<()>;
    /// Drops state for vessels without an open call whose last report is
    /// older than the cutoff.
    async fn prune_vessel_states(&self, cutoff: DateTime<Utc>) -> Result<()>;
}
