//! Braking model for STOPLINE.
//!
//! Pure functions that turn a `BrakingRequest` into friction multipliers,
//! distance corrections and a closed-form stopping distance. No mutable
//! state, so every function is safe to call from anywhere.

pub mod composition;
pub mod corrections;
pub mod factors;

pub use composition::{
    compare_grades, compose_friction, compute_braking_distance, compute_factor_breakdown, traction_friction,
};
