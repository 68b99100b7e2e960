use std::fmt::Display;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use itertools::Itertools;
use serde::Serialize;

use crate::{DateRange, Mean, PortCall, VesselState, Zone};

/// Snapshot of the port as of the most recent detection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortActivity {
    /// Vessels confirmed in the anchorage, waiting for a berth.
    pub inbound: u32,
    /// Vessels confirmed alongside.
    pub alongside: u32,
}

pub fn current_activity(states: &[VesselState]) -> PortActivity {
    let mut activity = PortActivity {
        inbound: 0,
        alongside: 0,
    };

    for s in states {
        match s.zone {
            Zone::OpenWater => {}
            Zone::Anchorage => activity.inbound += 1,
            Zone::Port => activity.alongside += 1,
        }
    }

    activity
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WaitStats {
    pub mean_minutes: Option<f64>,
    pub median_minutes: Option<f64>,
}

pub fn departures(calls: &[PortCall], range: &DateRange) -> u32 {
    calls
        .iter()
        .filter(|c| c.departure_at.is_some_and(|d| range.contains(d)))
        .count() as u32
}

pub fn arrivals(calls: &[PortCall], range: &DateRange) -> u32 {
    calls
        .iter()
        .filter(|c| range.contains(c.arrival_at))
        .count() as u32
}

/// Mean and median waiting time over calls arriving inside the range.
pub fn wait_stats(calls: &[PortCall], range: &DateRange) -> WaitStats {
    let mut waits: Vec<i32> = calls
        .iter()
        .filter(|c| range.contains(c.arrival_at))
        .map(|c| c.waiting_minutes)
        .collect();

    if waits.is_empty() {
        return WaitStats::default();
    }

    waits.sort_unstable();

    let mean_minutes = waits.iter().map(|v| *v as f64).mean();

    let mid = waits.len() / 2;
    let median_minutes = if waits.len() % 2 == 0 {
        (waits[mid - 1] + waits[mid]) as f64 / 2.0
    } else {
        waits[mid] as f64
    };

    WaitStats {
        mean_minutes,
        median_minutes: Some(median_minutes),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupResolution {
    Day,
    Week,
    Month,
}

/// Calendar bucket a call falls into at a given resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum PeriodKey {
    Day(NaiveDate),
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
}

impl PeriodKey {
    fn of(timestamp: DateTime<Utc>, resolution: RollupResolution) -> PeriodKey {
        match resolution {
            RollupResolution::Day => PeriodKey::Day(timestamp.date_naive()),
            RollupResolution::Week => {
                let week = timestamp.iso_week();
                PeriodKey::Week {
                    year: week.year(),
                    week: week.week(),
                }
            }
            RollupResolution::Month => PeriodKey::Month {
                year: timestamp.year(),
                month: timestamp.month(),
            },
        }
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodKey::Day(date) => date.fmt(f),
            PeriodKey::Week { year, week } => write!(f, "{year}-W{week:02}"),
            PeriodKey::Month { year, month } => write!(f, "{year}-{month:02}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodActivity {
    pub period: PeriodKey,
    pub arrivals: u32,
    pub departures: u32,
    pub wait: WaitStats,
}

/// Groups calls inside the range into calendar buckets. Arrivals bucket by
/// arrival timestamp, departures by departure timestamp, so summing bucket
/// departure counts over a range always equals [`departures`] for that
/// range even when a week straddles a month boundary.
pub fn rollup(
    calls: &[PortCall],
    range: &DateRange,
    resolution: RollupResolution,
) -> Vec<PeriodActivity> {
    let arrived: Vec<&PortCall> = calls
        .iter()
        .filter(|c| range.contains(c.arrival_at))
        .collect();

    let by_arrival = arrived
        .iter()
        .copied()
        .into_group_map_by(|c| PeriodKey::of(c.arrival_at, resolution));

    let departure_counts = calls
        .iter()
        .filter_map(|c| c.departure_at.filter(|d| range.contains(*d)))
        .counts_by(|d| PeriodKey::of(d, resolution));

    let mut periods: Vec<PeriodKey> = by_arrival
        .keys()
        .copied()
        .chain(departure_counts.keys().copied())
        .unique()
        .collect();
    periods.sort();

    periods
        .into_iter()
        .map(|period| {
            let arrived = by_arrival.get(&period).map(Vec::as_slice).unwrap_or(&[]);

            let mut waits: Vec<i32> = arrived.iter().map(|c| c.waiting_minutes).collect();
            waits.sort_unstable();

            let wait = if waits.is_empty() {
                WaitStats::default()
            } else {
                let mid = waits.len() / 2;
                WaitStats {
                    mean_minutes: waits.iter().map(|v| *v as f64).mean(),
                    median_minutes: Some(if waits.len() % 2 == 0 {
                        (waits[mid - 1] + waits[mid]) as f64 / 2.0
                    } else {
                        waits[mid] as f64
                    }),
                }
            };

            PeriodActivity {
                period,
                arrivals: arrived.len() as u32,
                departures: departure_counts.get(&period).copied().unwrap_or(0) as u32,
                wait,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KpiMetric {
    Arrivals,
    Departures,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearOverYear {
    pub metric: KpiMetric,
    pub current: u32,
    pub previous: u32,
    /// Percentage change against the prior-year period, `None` when the
    /// prior-year period has no observations.
    pub delta_pct: Option<f64>,
}

/// The metric for the requested period next to the same metric for the
/// equivalent period exactly one year earlier.
pub fn year_over_year(calls: &[PortCall], range: &DateRange, metric: KpiMetric) -> YearOverYear {
    let count = |range: &DateRange| match metric {
        KpiMetric::Arrivals => arrivals(calls, range),
        KpiMetric::Departures => departures(calls, range),
    };

    let current = count(range);
    let previous = range.prior_year().map(|r| count(&r)).unwrap_or(0);

    let delta_pct = (previous != 0)
        .then(|| (current as f64 - previous as f64) / previous as f64 * 100.0);

    YearOverYear {
        metric,
        current,
        previous,
        delta_pct,
    }
}
