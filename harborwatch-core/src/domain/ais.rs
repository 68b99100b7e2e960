use std::{fmt::Display, num::ParseIntError, str::FromStr};

use chrono::{DateTime, Utc};
use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::{AsRefStr, EnumString};
use tracing::warn;

use crate::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Mmsi(i32);

impl Mmsi {
    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl FromStr for Mmsi {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<Mmsi> for i32 {
    fn from(value: Mmsi) -> Self {
        value.0
    }
}

impl Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    FromPrimitive,
    Eq,
    Serialize_repr,
    Deserialize_repr,
    strum::Display,
    AsRefStr,
    EnumString,
)]
#[repr(i32)]
pub enum NavigationStatus {
    UnderWayUsingEngine = 0,
    AtAnchor = 1,
    NotUnderCommand = 2,
    RestrictedManoeuverability = 3,
    ConstrainedByDraught = 4,
    Moored = 5,
    Aground = 6,
    EngagedInFishing = 7,
    UnderWaySailing = 8,
    Reserved9 = 9,
    Reserved10 = 10,
    Reserved11 = 11,
    Reserved12 = 12,
    Reserved13 = 13,
    AisSartIsActive = 14,
    NotDefined = 15,
}

/// Position report as received from the feed. Coordinates are optional
/// because upstream occasionally emits reports without them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PositionMessage {
    pub mmsi: Mmsi,
    pub msgtime: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "speedOverGround")]
    pub speed_over_ground: Option<f64>,
    #[serde(rename = "courseOverGround")]
    pub course_over_ground: Option<f64>,
    #[serde(rename = "navigationalStatus")]
    pub navigational_status: Option<NavigationStatus>,
    pub destination: Option<String>,
}

/// A validated position report, coordinates guaranteed present.
#[derive(Debug, Clone)]
pub struct PositionReport {
    pub mmsi: Mmsi,
    pub msgtime: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_over_ground: Option<f64>,
    pub course_over_ground: Option<f64>,
    pub navigational_status: Option<NavigationStatus>,
    pub destination: Option<String>,
}

impl PositionReport {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl From<PositionMessage> for Option<PositionReport> {
    fn from(m: PositionMessage) -> Self {
        match (m.latitude, m.longitude) {
            (Some(latitude), Some(longitude)) => {
                let PositionMessage {
                    mmsi,
                    msgtime,
                    latitude: _,
                    longitude: _,
                    speed_over_ground,
                    course_over_ground,
                    navigational_status,
                    destination,
                } = m;

                Some(PositionReport {
                    mmsi,
                    msgtime,
                    latitude,
                    longitude,
                    speed_over_ground,
                    course_over_ground,
                    navigational_status,
                    destination,
                })
            }
            _ => {
                warn!(
                    "dropping position report without coordinates, mmsi: {}, msgtime: {}",
                    m.mmsi, m.msgtime
                );
                None
            }
        }
    }
}

#[cfg(feature = "test")]
mod test {
    use super::*;

    impl Mmsi {
        pub fn test_new(mmsi: i32) -> Self {
            Self(mmsi)
        }
    }

    impl PositionMessage {
        pub fn test_default(mmsi: Mmsi, msgtime: DateTime<Utc>) -> PositionMessage {
            PositionMessage {
                mmsi,
                msgtime,
                latitude: Some(10.44),
                longitude: Some(45.01),
                speed_over_ground: Some(0.2),
                course_over_ground: Some(213.4),
                navigational_status: Some(NavigationStatus::UnderWayUsingEngine),
                destination: Some("BERBERA".to_string()),
            }
        }
    }

    impl PositionReport {
        pub fn test_default(mmsi: Mmsi, msgtime: DateTime<Utc>) -> PositionReport {
            PositionReport {
                mmsi,
                msgtime,
                latitude: 10.44,
                longitude: 45.01,
                speed_over_ground: Some(0.2),
                course_over_ground: Some(213.4),
                navigational_status: Some(NavigationStatus::UnderWayUsingEngine),
                destination: Some("BERBERA".to_string()),
            }
        }
    }
}
