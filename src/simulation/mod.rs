//! Simulation engine
//!
//! Per-period update, performance evaluation, and the driver that runs a
//! population through `n_periods` periods and records per-condition
//! trajectories.

pub mod driver;
pub mod evaluate;
pub mod trajectory;
pub mod update;

pub use driver::run_simulation;
pub use evaluate::{evaluate_performance, MIN_PERFORMANCE};
pub use trajectory::{
    CapabilityMatrix, CapabilityTrajectories, PerformanceTrajectories, Trajectories,
};
pub use update::update_operator;
