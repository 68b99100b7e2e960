#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod date_range;
mod domain;
pub mod error;
mod kpi;
mod mean;
mod ports;

pub use date_range::*;
pub use domain::*;
pub use error::*;
pub use kpi::*;
pub use mean::*;
pub use ports::*;
