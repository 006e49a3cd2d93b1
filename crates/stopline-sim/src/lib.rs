//! Simulation engine for STOPLINE.
//!
//! Runs a vehicle from standstill, under driver input, through a committed
//! braking phase, and produces `RunSnapshot`s for the frontend.

pub mod config;
pub mod engine;
pub mod kinematics;
pub mod scenario;

pub use stopline_core as core;
pub use config::ConfigError;
pub use engine::{SimConfig, SimulationState};

#[cfg(test)]
mod tests;
