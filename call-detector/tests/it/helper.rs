use call_detector::{CallDetector, DestinationFilter, DetectorConfig};
use chrono::{DateTime, TimeZone, Utc};
use harborwatch_core::{Geofence, Mmsi, PositionReport, ZoneKind};

pub const PORT_WKT: &str =
    "POLYGON((45.00 10.43, 45.03 10.43, 45.03 10.46, 45.00 10.46, 45.00 10.43))";
pub const ANCHORAGE_WKT: &str =
    "POLYGON((44.95 10.40, 45.00 10.40, 45.00 10.45, 44.95 10.45, 44.95 10.40))";

/// (latitude, longitude) well outside both zones.
pub const OPEN_WATER: (f64, f64) = (10.60, 45.20);
/// (latitude, longitude) inside the anchorage polygon.
pub const ANCHORAGE: (f64, f64) = (10.42, 44.97);
/// (latitude, longitude) inside the port polygon.
pub const PORT: (f64, f64) = (10.44, 45.01);

pub fn geofences() -> Vec<Geofence> {
    vec![
        Geofence::from_wkt("berbera_port", ZoneKind::Port, PORT_WKT).unwrap(),
        Geofence::from_wkt("berbera_anchorage", ZoneKind::Anchorage, ANCHORAGE_WKT).unwrap(),
    ]
}

pub fn detector() -> CallDetector {
    CallDetector::new(
        DetectorConfig::default(),
        geofences(),
        DestinationFilter::new(["BERBERA"]),
    )
    .unwrap()
}

pub fn mmsi() -> Mmsi {
    Mmsi::test_new(563012345)
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap()
}

pub fn report(
    mmsi: Mmsi,
    msgtime: DateTime<Utc>,
    position: (f64, f64),
    sog: f64,
) -> PositionReport {
    let mut report = PositionReport::test_default(mmsi, msgtime);
    report.latitude = position.0;
    report.longitude = position.1;
    report.speed_over_ground = Some(sog);
    report
}
