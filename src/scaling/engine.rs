//! Coordinate scaling engine

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::calibration::Calibration;
use crate::consts::FEET_PER_YARD;
use crate::finite_or;
use crate::state::GameState;
use crate::units::yards_to_feet;

/// Banded world-units-per-foot table: (upper bound in feet, units per foot).
/// Each band was tuned against "what N yards should look like" reference shots.
const BANDS: [(f32, f32); 4] = [(10.0, 1.0), (25.0, 0.8), (50.0, 0.6), (100.0, 0.4)];
/// Units per foot past the last band
const FAR_UNITS_PER_FOOT: f32 = 0.25;

/// The banded step function, non-increasing in distance
#[derive(Debug, Clone, Copy, Default)]
pub struct BandedScale;

impl BandedScale {
    pub fn units_per_foot(distance_feet: f32) -> f32 {
        let d = sanitize_distance(distance_feet);
        BANDS
            .iter()
            .find(|(limit, _)| d <= *limit)
            .map(|(_, scale)| *scale)
            .unwrap_or(FAR_UNITS_PER_FOOT)
    }

    /// Band boundaries in feet
    pub fn boundaries() -> impl Iterator<Item = f32> {
        BANDS.into_iter().map(|(limit, _)| limit)
    }
}

/// Banded units per foot for `distance_feet`
#[inline]
pub fn get_world_units_per_foot(distance_feet: f32) -> f32 {
    BandedScale::units_per_foot(distance_feet)
}

/// Banded render-space Z for a point `distance_feet` ahead of `reference_z`
#[inline]
pub fn compute_world_position(distance_feet: f32, reference_z: f32) -> f32 {
    CoordinateScalingEngine::banded().world_position(distance_feet, reference_z)
}

/// Negative and non-finite distances collapse to zero
#[inline]
fn sanitize_distance(distance_feet: f32) -> f32 {
    finite_or(distance_feet, 0.0).max(0.0)
}

/// How real distances become render distances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScalingStrategy {
    /// Step function over distance bands
    #[default]
    Banded,
    /// One global ratio averaged from calibration points
    #[serde(rename_all = "camelCase")]
    AveragedRatio { units_per_yard: f32 },
}

impl ScalingStrategy {
    /// Averaged-ratio strategy from a validated calibration table
    pub fn averaged(calibration: &Calibration) -> Self {
        ScalingStrategy::AveragedRatio {
            units_per_yard: calibration.units_per_yard(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalingStrategy::Banded => "banded",
            ScalingStrategy::AveragedRatio { .. } => "averaged-ratio",
        }
    }
}

/// Fixed render-space point everything is placed relative to (the ball, or
/// the viewer standing behind it). The hole lies along -Z from the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViewAnchor {
    #[serde(with = "crate::wire::vec3")]
    pub origin: Vec3,
}

impl ViewAnchor {
    pub fn new(origin: Vec3) -> Self {
        Self { origin }
    }

    pub fn reference_z(&self) -> f32 {
        self.origin.z
    }
}

/// Render positions for the ball and hole of one game state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPlacement {
    #[serde(with = "crate::wire::vec3")]
    pub ball: Vec3,
    #[serde(with = "crate::wire::vec3")]
    pub hole: Vec3,
    /// Scale used for the ball-to-hole span
    pub units_per_foot: f32,
}

/// Maps real-world feet to render-space units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateScalingEngine {
    pub strategy: ScalingStrategy,
}

impl CoordinateScalingEngine {
    pub fn new(strategy: ScalingStrategy) -> Self {
        Self { strategy }
    }

    pub fn banded() -> Self {
        Self::new(ScalingStrategy::Banded)
    }

    pub fn from_calibration(calibration: &Calibration) -> Self {
        Self::new(ScalingStrategy::averaged(calibration))
    }

    /// Render units per real foot at `distance_feet`
    pub fn world_units_per_foot(&self, distance_feet: f32) -> f32 {
        match self.strategy {
            ScalingStrategy::Banded => BandedScale::units_per_foot(distance_feet),
            ScalingStrategy::AveragedRatio { units_per_yard } => {
                finite_or(units_per_yard, 0.0).max(0.0) / FEET_PER_YARD
            }
        }
    }

    /// Render-space length of a real distance
    pub fn world_distance(&self, distance_feet: f32) -> f32 {
        let d = sanitize_distance(distance_feet);
        d * self.world_units_per_foot(d)
    }

    /// Render-space length of a distance in yards
    pub fn world_distance_yards(&self, distance_yards: f32) -> f32 {
        self.world_distance(yards_to_feet(distance_yards))
    }

    /// Z of a point `distance_feet` ahead of `reference_z`
    pub fn world_position(&self, distance_feet: f32, reference_z: f32) -> f32 {
        reference_z - self.world_distance(distance_feet)
    }

    /// Render point `forward_feet` toward the hole and `lateral_feet` to the
    /// right of the anchor. Negative `forward_feet` lands behind the anchor.
    /// Both axes share the forward distance's scale so shapes keep their
    /// proportions.
    pub fn world_point(&self, anchor: &ViewAnchor, forward_feet: f32, lateral_feet: f32) -> Vec3 {
        let forward = finite_or(forward_feet, 0.0);
        let scale = self.world_units_per_foot(forward.abs());
        Vec3::new(
            anchor.origin.x + finite_or(lateral_feet, 0.0) * scale,
            anchor.origin.y,
            anchor.reference_z() - forward * scale,
        )
    }

    /// Ball sits on the anchor, hole is placed by the remaining distance
    pub fn place_ball_and_hole(&self, state: &GameState, anchor: &ViewAnchor) -> ViewPlacement {
        let remaining_feet = state.remaining_feet();
        let placement = ViewPlacement {
            ball: anchor.origin,
            hole: self.world_point(anchor, remaining_feet, 0.0),
            units_per_foot: self.world_units_per_foot(remaining_feet),
        };
        log::debug!(
            "Placed hole {:.1} ft out at z={:.2} ({})",
            remaining_feet,
            placement.hole.z,
            self.strategy.as_str()
        );
        placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_values() {
        assert_eq!(get_world_units_per_foot(3.0), 1.0);
        assert_eq!(get_world_units_per_foot(10.0), 1.0);
        assert_eq!(get_world_units_per_foot(10.5), 0.8);
        assert_eq!(get_world_units_per_foot(25.0), 0.8);
        assert_eq!(get_world_units_per_foot(40.0), 0.6);
        assert_eq!(get_world_units_per_foot(100.0), 0.4);
        assert_eq!(get_world_units_per_foot(900.0), 0.25);
    }

    #[test]
    fn test_bad_distances_use_first_band() {
        assert_eq!(get_world_units_per_foot(-5.0), 1.0);
        assert_eq!(get_world_units_per_foot(f32::NAN), 1.0);
    }

    #[test]
    fn test_non_increasing_across_boundaries() {
        for limit in BandedScale::boundaries() {
            let below = get_world_units_per_foot(limit - 0.01);
            let at = get_world_units_per_foot(limit);
            let above = get_world_units_per_foot(limit + 0.01);
            assert!(below >= at && at >= above, "band edge {limit}");
        }
    }

    #[test]
    fn test_world_position_relative_to_reference() {
        assert_eq!(compute_world_position(10.0, 0.0), -10.0);
        assert_eq!(compute_world_position(20.0, 5.0), 5.0 - 16.0);
        // 300 yards: 900 ft at 0.25 units/ft
        assert_eq!(compute_world_position(900.0, 0.0), -225.0);
    }

    #[test]
    fn test_averaged_ratio_strategy() {
        let engine = CoordinateScalingEngine::new(ScalingStrategy::AveragedRatio { units_per_yard: 0.75 });
        assert!((engine.world_units_per_foot(3.0) - 0.25).abs() < 1e-6);
        assert!((engine.world_distance_yards(300.0) - 225.0).abs() < 1e-3);
    }

    #[test]
    fn test_world_point_lateral_scaled() {
        let engine = CoordinateScalingEngine::banded();
        let anchor = ViewAnchor::new(Vec3::new(1.0, 0.5, 2.0));
        let p = engine.world_point(&anchor, 40.0, 10.0);
        assert!((p.x - 7.0).abs() < 1e-5);
        assert_eq!(p.y, 0.5);
        assert!((p.z - (2.0 - 24.0)).abs() < 1e-5);
    }

    #[test]
    fn test_world_point_behind_anchor() {
        let engine = CoordinateScalingEngine::banded();
        let p = engine.world_point(&ViewAnchor::default(), -5.0, 0.0);
        assert!((p.z - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_place_ball_and_hole() {
        let engine = CoordinateScalingEngine::banded();
        let anchor = ViewAnchor::default();
        let state = GameState::putting_green(9.0);
        let placement = engine.place_ball_and_hole(&state, &anchor);
        assert_eq!(placement.ball, Vec3::ZERO);
        assert!((placement.hole.z + 9.0).abs() < 1e-4);
        assert_eq!(placement.units_per_foot, 1.0);
    }

    #[test]
    fn test_placement_and_anchor_wire_shape() {
        let anchor: ViewAnchor = serde_json::from_str(r#"{"origin":{"x":0,"y":0.5,"z":2}}"#).unwrap();
        assert_eq!(anchor.origin, Vec3::new(0.0, 0.5, 2.0));

        let placement = CoordinateScalingEngine::banded().place_ball_and_hole(&GameState::putting_green(9.0), &anchor);
        let v = serde_json::to_value(placement).unwrap();
        assert_eq!(v["ball"]["z"].as_f64(), Some(2.0));
        assert!((v["hole"]["z"].as_f64().unwrap() + 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_strategy_serde_tagged() {
        let json = serde_json::to_string(&ScalingStrategy::AveragedRatio { units_per_yard: 0.5 }).unwrap();
        assert_eq!(json, r#"{"kind":"averagedRatio","unitsPerYard":0.5}"#);
        let back: ScalingStrategy = serde_json::from_str(r#"{"kind":"banded"}"#).unwrap();
        assert_eq!(back, ScalingStrategy::Banded);
    }

    proptest! {
        /// Property: scale never grows with distance
        #[test]
        fn prop_units_per_foot_non_increasing(a in 0.0f32..2_000.0f32, b in 0.0f32..2_000.0f32) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(get_world_units_per_foot(near) >= get_world_units_per_foot(far));
        }

        /// Property: farther points never land behind the reference
        #[test]
        fn prop_world_position_ahead_of_reference(d in 0.0f32..2_000.0f32, z in -100.0f32..100.0f32) {
            prop_assert!(compute_world_position(d, z) <= z);
        }
    }
}
