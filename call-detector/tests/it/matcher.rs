use crate::helper::*;
use call_detector::ZoneMatcher;
use harborwatch_core::{Coordinates, Error, Geofence, Zone, ZoneKind};

fn coords(position: (f64, f64)) -> Coordinates {
    Coordinates {
        latitude: position.0,
        longitude: position.1,
    }
}

#[test]
fn test_classifies_each_zone_and_open_water() {
    let matcher = ZoneMatcher::new(geofences()).unwrap();

    assert_eq!(matcher.classify(coords(PORT)), Zone::Port);
    assert_eq!(matcher.classify(coords(ANCHORAGE)), Zone::Anchorage);
    assert_eq!(matcher.classify(coords(OPEN_WATER)), Zone::OpenWater);
}

#[test]
fn test_port_wins_when_polygons_overlap() {
    let overlapping_anchorage = Geofence::from_wkt(
        "anchorage_overlapping_port",
        ZoneKind::Anchorage,
        "POLYGON((44.95 10.40, 45.03 10.40, 45.03 10.46, 44.95 10.46, 44.95 10.40))",
    )
    .unwrap();

    let mut geofences = geofences();
    geofences.push(overlapping_anchorage);
    // Anchorage listed before port must not matter.
    geofences.reverse();

    let matcher = ZoneMatcher::new(geofences).unwrap();

    assert_eq!(matcher.classify(coords(PORT)), Zone::Port);
}

#[test]
fn test_point_on_polygon_boundary_counts_as_inside() {
    let matcher = ZoneMatcher::new(geofences()).unwrap();

    // West edge of the port polygon.
    assert_eq!(
        matcher.classify(Coordinates {
            latitude: 10.44,
            longitude: 45.00,
        }),
        Zone::Port
    );
    // Corner vertex.
    assert_eq!(
        matcher.classify(Coordinates {
            latitude: 10.43,
            longitude: 45.03,
        }),
        Zone::Port
    );
}

#[test]
fn test_self_intersecting_polygon_is_rejected_at_load_time() {
    let bowtie = "POLYGON((0 0, 2 2, 2 0, 0 2, 0 0))";

    let err = Geofence::from_wkt("broken", ZoneKind::Port, bowtie).unwrap_err();

    assert!(matches!(err, Error::Geometry { .. }));
}

#[test]
fn test_non_polygon_wkt_is_rejected() {
    let err = Geofence::from_wkt("point", ZoneKind::Port, "POINT(45.01 10.44)").unwrap_err();

    assert!(matches!(err, Error::GeofenceNotAPolygon { .. }));
}
