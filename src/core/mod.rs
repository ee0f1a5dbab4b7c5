pub mod config;
pub mod error;
pub mod params;
pub mod types;

pub use error::{Result, SimError};
pub use params::{SimulationParameters, SweepParameter};
