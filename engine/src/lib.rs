#![deny(warnings)]
#![deny(rust_2018_idioms)]

use harborwatch_core::{DetectionInboundPort, DetectionOutboundPort};

pub mod detection;
pub mod error;
pub mod settings;
pub mod startup;

pub use detection::*;
pub use error::*;
pub use settings::*;
pub use startup::*;

/// The storage adapter a detection run requires.
pub trait DetectionStore: DetectionInboundPort + DetectionOutboundPort + 'static {}

impl<T> DetectionStore for T where T: DetectionInboundPort + DetectionOutboundPort + 'static {}
