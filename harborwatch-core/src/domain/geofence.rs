use std::str::FromStr;

use geo::{Polygon, Validation};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use wkt::Wkt;

use crate::{
    Result,
    error::error::{GeofenceNotAPolygonSnafu, GeofenceWktSnafu, GeometrySnafu},
};

/// What a geofence polygon delimits. `Port` outranks `Anchorage` when
/// polygons overlap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, strum::Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZoneKind {
    Anchorage,
    Port,
}

/// Spatial classification of a single position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, strum::Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Zone {
    #[default]
    OpenWater,
    Anchorage,
    Port,
}

impl From<ZoneKind> for Zone {
    fn from(value: ZoneKind) -> Self {
        match value {
            ZoneKind::Anchorage => Zone::Anchorage,
            ZoneKind::Port => Zone::Port,
        }
    }
}

impl Zone {
    /// Containment priority, highest wins when polygons overlap.
    pub fn priority(self) -> u32 {
        match self {
            Zone::OpenWater => 0,
            Zone::Anchorage => 1,
            Zone::Port => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Geofence {
    pub id: String,
    pub kind: ZoneKind,
    pub polygon: Polygon,
}

impl Geofence {
    /// Builds a geofence from wkt text and verifies the geometry.
    /// Geometry validation happens once here, at load time, never per point.
    pub fn from_wkt(id: impl Into<String>, kind: ZoneKind, wkt: &str) -> Result<Geofence> {
        let id = id.into();

        let parsed = Wkt::<f64>::from_str(wkt).map_err(|e| {
            GeofenceWktSnafu {
                geofence_id: id.clone(),
                reason: e.to_string(),
            }
            .build()
        })?;

        let geometry: geo::Geometry<f64> =
            parsed
                .try_into()
                .map_err(|e: wkt::geo_types_from_wkt::Error| {
                    GeofenceWktSnafu {
                        geofence_id: id.clone(),
                        reason: e.to_string(),
                    }
                    .build()
                })?;

        let polygon = match geometry {
            geo::Geometry::Polygon(p) => p,
            _ => return GeofenceNotAPolygonSnafu { geofence_id: id }.fail(),
        };

        Self::new(id, kind, polygon)
    }

    pub fn new(id: impl Into<String>, kind: ZoneKind, polygon: Polygon) -> Result<Geofence> {
        let id = id.into();

        if let Err(e) = polygon.check_validation() {
            return GeometrySnafu {
                geofence_id: id,
                reason: e.to_string(),
            }
            .fail();
        }

        Ok(Geofence { id, kind, polygon })
    }

    pub fn zone(&self) -> Zone {
        self.kind.into()
    }
}

impl PartialEq for Geofence {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
