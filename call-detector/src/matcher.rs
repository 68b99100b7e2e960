use geo::{Intersects, coord};
use harborwatch_core::{Coordinates, Geofence, Result, Zone};

/// Point-in-zone classification against the configured geofence set.
///
/// The set is tiny (one port, one or a few anchorages) so containment is a
/// linear scan over polygons ordered by zone priority; the first hit wins,
/// which makes `port` win over `anchorage` wherever they overlap.
#[derive(Debug, Clone)]
pub struct ZoneMatcher {
    geofences: Vec<Geofence>,
}

impl ZoneMatcher {
    /// Orders the set by zone priority and re-checks every polygon, so a
    /// matcher can never be constructed over invalid geometry regardless of
    /// how the [`Geofence`] values were produced.
    pub fn new(geofences: Vec<Geofence>) -> Result<ZoneMatcher> {
        let mut geofences = geofences
            .into_iter()
            .map(|g| Geofence::new(g.id, g.kind, g.polygon))
            .collect::<Result<Vec<_>>>()?;

        geofences.sort_by_key(|g| std::cmp::Reverse(g.zone().priority()));

        Ok(ZoneMatcher { geofences })
    }

    /// Highest-priority zone containing the point, `OpenWater` otherwise.
    /// Points on a polygon boundary count as inside.
    pub fn classify(&self, coordinates: Coordinates) -> Zone {
        let coord = coord! {x: coordinates.longitude, y: coordinates.latitude};

        self.geofences
            .iter()
            .find(|g| g.polygon.intersects(&coord))
            .map(|g| g.zone())
            .unwrap_or(Zone::OpenWater)
    }
}
