#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod destination;
mod detector;
mod matcher;
mod statemachine;

pub use destination::*;
pub use detector::*;
pub use matcher::*;
pub use statemachine::*;
