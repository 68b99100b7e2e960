mod ais;
mod geofence;
mod port_call;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

pub use ais::*;
pub use geofence::*;
pub use port_call::*;
