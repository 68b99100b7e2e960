use chrono::{DateTime, Utc};
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Geofence '{geofence_id}' has invalid geometry: {reason}"))]
    Geometry {
        #[snafu(implicit)]
        location: Location,
        geofence_id: String,
        reason: String,
    },
    #[snafu(display("Failed to parse wkt of geofence '{geofence_id}': {reason}"))]
    GeofenceWkt {
        #[snafu(implicit)]
        location: Location,
        geofence_id: String,
        reason: String,
    },
    #[snafu(display("Geofence '{geofence_id}' is not a polygon"))]
    GeofenceNotAPolygon {
        #[snafu(implicit)]
        location: Location,
        geofence_id: String,
    },
    #[snafu(display("Invalid date range"))]
    InvalidDateRange {
        #[snafu(implicit)]
        location: Location,
        source: DateRangeError,
    },
    #[snafu(display("Failed a storage operation"))]
    Storage {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: BoxError,
    },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(display("Date range start '{start}' was after end '{end}'"))]
pub struct DateRangeError {
    #[snafu(implicit)]
    pub location: Location,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
