use std::sync::Arc;

use call_detector::CallDetector;
use chrono::{DateTime, Utc};
use snafu::ResultExt;

use crate::{
    DetectionOutcome, DetectionSettings, DetectionStore, Result, Settings,
    detection::run_detection, error::error::CoreSnafu,
};

pub struct App<A> {
    store: Arc<A>,
    num_workers: u32,
    detection: DetectionSettings,
}

impl<A: DetectionStore> App<A> {
    /// The storage adapter is supplied by the embedding service; which
    /// engine persists reports and records is a collaborator concern.
    pub fn build(settings: &Settings, store: A) -> App<A> {
        App {
            store: Arc::new(store),
            num_workers: settings.num_workers,
            detection: settings.detection.clone(),
        }
    }

    pub fn store(&self) -> &A {
        self.store.as_ref()
    }

    /// Executes a single detection cycle. Scheduling and retry/backoff
    /// belong to the caller; a failed run simply never advances the
    /// watermark, so rerunning it is safe.
    pub async fn run(&self) -> Result<DetectionOutcome> {
        self.run_at(Utc::now()).await
    }

    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<DetectionOutcome> {
        let geofences = self.store.geofences().await.context(CoreSnafu)?;

        let detector = CallDetector::new(
            self.detection.detector_config(),
            geofences,
            self.detection.destination_filter(),
        )
        .context(CoreSnafu)?;

        run_detection(
            self.store.clone(),
            Arc::new(detector),
            self.num_workers,
            self.detection.state_retention(),
            now,
        )
        .await
    }
}
