//! Putt outcome prediction
//!
//! Pure and deterministic: the same input always yields the same outcome.
//! Inputs are clamped into range rather than rejected, so every outcome is
//! finite and safe to hand straight to the renderer.

pub mod calculator;
pub mod input;

pub use calculator::{
    PuttOutcome, TrajectoryPoint, aim_point, calculate_putt_recommendation,
    calculate_with_samples, strength_percent, success_probability, trajectory,
};
pub use input::{PuttInput, PuttingStyle};
