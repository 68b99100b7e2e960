use std::{cmp::min, collections::HashMap, sync::Arc};

use call_detector::CallDetector;
use chrono::{DateTime, Duration, Utc};
use harborwatch_core::{Mmsi, PortCallEvent, PositionReport, VesselCommit, VesselState, Zone};
use snafu::ResultExt;
use tokio::sync::{Mutex, mpsc::channel};
use tracing::{info, instrument};

use crate::{
    DetectionStore, Error, Result,
    error::error::{CoreSnafu, JoinSnafu},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionOutcome {
    pub vessels_processed: u32,
    pub calls_opened: u32,
    pub calls_closed: u32,
    pub watermark: Option<DateTime<Utc>>,
}

/// One detection cycle over everything received since the watermark.
///
/// Reports are partitioned by vessel and each partition is processed in
/// timestamp order, partitions concurrently. All reads happen up front and
/// every write is a per-vessel atomic commit, so an aborted run leaves no
/// partial transition behind. The watermark advances once, only after every
/// partition has committed, which is what makes a retried run over the same
/// window safe.
#[instrument(skip_all)]
pub async fn run_detection<A>(
    store: Arc<A>,
    detector: Arc<CallDetector>,
    num_workers: u32,
    state_retention: Duration,
    now: DateTime<Utc>,
) -> Result<DetectionOutcome>
where
    A: DetectionStore,
{
    let watermark = store.watermark().await.context(CoreSnafu)?;
    let messages = store
        .position_messages(watermark)
        .await
        .context(CoreSnafu)?;

    let mut new_watermark = watermark;
    let mut partitions: HashMap<Mmsi, Vec<PositionReport>> = HashMap::new();

    for message in messages {
        let Some(report) = Option::<PositionReport>::from(message) else {
            continue;
        };

        if new_watermark.is_none_or(|w| report.msgtime > w) {
            new_watermark = Some(report.msgtime);
        }

        partitions.entry(report.mmsi).or_default().push(report);
    }

    for reports in partitions.values_mut() {
        reports.sort_by_key(|r| r.msgtime);
    }

    // Vessels alongside that went silent produce no reports but must still
    // be visited for the stale-call timeout rule.
    for state in store.vessel_states().await.context(CoreSnafu)? {
        if state.zone == Zone::Port {
            partitions.entry(state.mmsi).or_default();
        }
    }

    let mut outcome = DetectionOutcome {
        watermark: new_watermark,
        ..Default::default()
    };

    if !partitions.is_empty() {
        let vessels: Vec<(Mmsi, Vec<PositionReport>)> = partitions.into_iter().collect();
        let num_vessels = vessels.len();
        let num_workers = min(num_workers as usize, num_vessels).max(1);

        let (master_tx, mut master_rx) = channel::<Result<Option<VesselCommit>>>(10);
        let (worker_tx, worker_rx) = channel::<(Mmsi, Vec<PositionReport>)>(num_vessels);
        let worker_rx = Arc::new(Mutex::new(worker_rx));

        for v in vessels {
            worker_tx.try_send(v).unwrap();
        }

        let mut workers = Vec::with_capacity(num_workers);

        for _ in 0..num_workers {
            workers.push(tokio::spawn({
                let master_tx = master_tx.clone();
                let worker_rx = worker_rx.clone();
                let store = store.clone();
                let detector = detector.clone();

                async move {
                    while let Ok((mmsi, reports)) = { worker_rx.lock().await.try_recv() } {
                        let output =
                            process_vessel(store.as_ref(), &detector, mmsi, reports, now).await;
                        master_tx.send(output).await.unwrap();
                    }
                }
            }));
        }

        drop(master_tx);

        let mut failure: Option<Error> = None;

        while let Some(output) = master_rx.recv().await {
            match output {
                Ok(None) => outcome.vessels_processed += 1,
                Ok(Some(commit)) => {
                    if failure.is_some() {
                        continue;
                    }

                    let events = commit.events.clone();
                    match store.commit_vessel(commit).await.context(CoreSnafu) {
                        Ok(()) => {
                            outcome.vessels_processed += 1;
                            for event in &events {
                                match event {
                                    PortCallEvent::Opened(_) => outcome.calls_opened += 1,
                                    PortCallEvent::Closed { .. } => outcome.calls_closed += 1,
                                }
                            }
                        }
                        Err(e) => failure = Some(e),
                    }
                }
                Err(e) => {
                    if failure.is_none() {
                        failure = Some(e);
                    }
                }
            }
        }

        for w in workers {
            w.await.context(JoinSnafu)?;
        }

        if let Some(e) = failure {
            return Err(e);
        }
    }

    if new_watermark != watermark {
        if let Some(w) = new_watermark {
            store.set_watermark(w).await.context(CoreSnafu)?;
        }
    }

    store
        .prune_vessel_states(now - state_retention)
        .await
        .context(CoreSnafu)?;

    info!(
        "detection run complete, vessels: {}, opened: {}, closed: {}",
        outcome.vessels_processed, outcome.calls_opened, outcome.calls_closed
    );

    Ok(outcome)
}

async fn process_vessel<A: DetectionStore>(
    store: &A,
    detector: &CallDetector,
    mmsi: Mmsi,
    reports: Vec<PositionReport>,
    now: DateTime<Utc>,
) -> Result<Option<VesselCommit>> {
    let state = store
        .vessel_state(mmsi)
        .await
        .context(CoreSnafu)?
        .unwrap_or_else(|| VesselState::unknown(mmsi));
    let open_call = store.open_port_call(mmsi).await.context(CoreSnafu)?;

    let before = state.clone();
    let commit = detector.detect(state, open_call, &reports, now);

    Ok((commit.state != before || !commit.events.is_empty()).then_some(commit))
}
