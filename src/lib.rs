//! Putt Vision - putt prediction and render-space scaling for a 3D golf visualizer
//!
//! Core modules:
//! - `putt`: Putt outcome calculator (aim point, strength, trajectory, probability)
//! - `units`: Feet/yards/paces conversion
//! - `scaling`: Distance-to-render-space scaling and feature visibility
//! - `spectators`: Seeded background spectator layout
//! - `state`: Whole-value game state snapshot shared with the renderer
//! - `settings`: Tunable configuration persisted as JSON
//! - `wire`: Object-shaped JSON for vector fields
//! - `bridge`: wasm-bindgen exports for the web client (wasm32 only)

pub mod putt;
pub mod scaling;
pub mod settings;
pub mod spectators;
pub mod state;
pub mod units;
mod wire;

#[cfg(target_arch = "wasm32")]
pub mod bridge;

pub use putt::{PuttInput, PuttOutcome, PuttingStyle, calculate_putt_recommendation};
pub use scaling::{
    CoordinateScalingEngine, FeatureCategory, FeaturePosition, FeatureVisibilityResolver,
    ScalingStrategy, ViewAnchor,
};
pub use settings::Settings;
pub use spectators::{SpectatorConfig, SpectatorKind, generate_spectator_config};
pub use state::{GameMode, GameState};
pub use units::{DistanceUnit, convert};

use glam::Vec2;

/// Tuning constants shared across modules
pub mod consts {
    /// Feet per yard
    pub const FEET_PER_YARD: f32 = 3.0;
    /// Default stride length for pacing off a putt
    pub const DEFAULT_PACE_LENGTH_FEET: f32 = 3.0;

    /// Input ranges accepted by the putt calculator (values outside are clamped)
    pub const SLOPE_PERCENT_RANGE: (f32, f32) = (-20.0, 20.0);
    pub const BREAK_PERCENT_RANGE: (f32, f32) = (0.0, 50.0);
    pub const GREEN_SPEED_RANGE: (f32, f32) = (6.0, 14.0);
    /// Stimpmeter reading treated as a "normal" green
    pub const REFERENCE_GREEN_SPEED: f32 = 10.0;

    /// Output ranges
    pub const STRENGTH_RANGE: (f32, f32) = (50.0, 150.0);
    pub const PROBABILITY_RANGE: (f32, f32) = (0.05, 0.98);

    /// Longest distance the calculator distinguishes; anything farther scores the same
    pub const MAX_DISTANCE_FEET: f32 = 3_000.0;

    /// Default number of trajectory segments
    pub const DEFAULT_TRAJECTORY_SAMPLES: usize = 20;

    /// Non-pin features farther than this fraction of the hole are hidden
    pub const DEFAULT_FEATURE_VISIBILITY_FRACTION: f32 = 0.8;
    /// Remaining distance at which play switches to putting
    pub const PUTT_MODE_THRESHOLD_YARDS: f32 = 20.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two angles in degrees, in [0, 180]
#[inline]
pub fn angular_distance_deg(a: f32, b: f32) -> f32 {
    let diff = normalize_degrees(a - b);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Convert a bearing (degrees, 0 = toward the hole, clockwise) and radius to
/// ground-plane (x, z). The hole lies along -Z from the viewer.
#[inline]
pub fn polar_to_ground(radius: f32, bearing_deg: f32) -> Vec2 {
    let theta = bearing_deg.to_radians();
    Vec2::new(radius * theta.sin(), -radius * theta.cos())
}

/// Replace NaN/infinite values with a fallback before clamping
#[inline]
pub(crate) fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!((normalize_degrees(725.0) - 5.0).abs() < 1e-3);
        assert!(normalize_degrees(-1e-7) < 360.0);
    }

    #[test]
    fn test_angular_distance_wraps() {
        assert!((angular_distance_deg(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((angular_distance_deg(10.0, 350.0) - 20.0).abs() < 1e-4);
        assert!((angular_distance_deg(0.0, 180.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_polar_to_ground() {
        // Straight ahead points toward the hole (-Z)
        let p = polar_to_ground(2.0, 0.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y + 2.0).abs() < 1e-5);

        // 90 degrees is to the right (+X)
        let p = polar_to_ground(2.0, 90.0);
        assert!((p.x - 2.0).abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
    }
}
