//! Core types and definitions for the STOPLINE braking estimator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! categorical inputs, reference tables, the braking request and result,
//! driver commands, run snapshots, and constants. It contains no physics.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod result;
pub mod state;
pub mod tables;
pub mod types;

#[cfg(test)]
mod tests;
