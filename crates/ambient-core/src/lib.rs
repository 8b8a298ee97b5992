pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod particle;
pub mod raster;
pub mod sim;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::*;
pub use error::ConfigError;
pub use input::{HostEvent, InputCoupler, ScrollSignal, Viewport};
pub use lifecycle::{Host, Lifecycle, MountOutcome, Phase};
pub use particle::{Particle, ParticleStore};
pub use raster::{configure_surface, present, Surface};
pub use sim::{step, wrap_unit, StepInput};
