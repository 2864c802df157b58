//! Putt recommendation math
//!
//! Coordinates are putt-local feet: +Y runs from the ball to the hole and +X
//! is to the right of that line. Break direction 0 breaks along the line,
//! 90 breaks right.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::PuttInput;
use crate::consts::*;

/// Base stroke strength for a flat 10 ft putt on a stimp-10 green
const BASE_STRENGTH: f32 = 100.0;
/// Extra strength per percent of uphill slope
const SLOPE_STRENGTH_FACTOR: f32 = 1.5;
/// Extra strength per stimp below the reference speed
const GREEN_SPEED_STRENGTH_FACTOR: f32 = 2.0;
/// Putts longer than this need extra strength for rolling friction
const FRICTION_FREE_DISTANCE_FEET: f32 = 10.0;
const FRICTION_STRENGTH_PER_FOOT: f32 = 0.5;

/// Players aim inside the full break, not at its lateral extent
const AIM_LATERAL_FACTOR: f32 = 0.3;
const AIM_DEPTH_FACTOR: f32 = 0.1;

/// Distance at which the base make-chance bottoms out
const PROBABILITY_DISTANCE_SCALE_FEET: f32 = 50.0;
/// Even a perfect read on a flat green is not a certainty
const PROBABILITY_DERATING: f32 = 0.85;

/// One sample of the intended ball path.
///
/// `#[repr(C)]` so the trajectory can be uploaded as a vertex buffer directly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Lateral offset (feet)
    pub x: f32,
    /// Distance along the putt line (feet)
    pub y: f32,
    /// Curve parameter in [0, 1]
    pub t: f32,
}

impl TrajectoryPoint {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Recommendation for a single putt, recomputed wholesale on every input change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuttOutcome {
    /// Where to aim relative to the hole (feet)
    #[serde(with = "crate::wire::vec2")]
    pub aim_point: Vec2,
    /// Required stroke strength, 100 = normal
    pub strength_percent: f32,
    /// Sampled ball path from the ball (t = 0) to the hole (t = 1)
    pub trajectory: Vec<TrajectoryPoint>,
    /// Estimated chance of holing the putt
    pub success_probability: f32,
    /// Putt length the outcome was computed for
    pub distance_feet: f32,
}

impl PuttOutcome {
    /// Aim target in putt-local feet (hole position shifted by the aim point)
    pub fn aim_target(&self) -> Vec2 {
        Vec2::new(self.aim_point.x, self.distance_feet + self.aim_point.y)
    }

    /// Unit direction of the aim line from the ball.
    ///
    /// Falls back to straight ahead when the target coincides with the ball.
    pub fn aim_direction(&self) -> Vec2 {
        self.aim_target().try_normalize().unwrap_or(Vec2::Y)
    }

    /// Final trajectory sample (the hole end of the curve)
    pub fn end_point(&self) -> Option<TrajectoryPoint> {
        self.trajectory.last().copied()
    }
}

/// Compute the full recommendation with the default trajectory resolution
pub fn calculate_putt_recommendation(input: &PuttInput) -> PuttOutcome {
    calculate_with_samples(input, DEFAULT_TRAJECTORY_SAMPLES)
}

/// Compute the full recommendation with `samples` trajectory segments
pub fn calculate_with_samples(input: &PuttInput, samples: usize) -> PuttOutcome {
    let input = input.clamped();
    let distance_feet = input.distance_feet();

    let outcome = PuttOutcome {
        aim_point: aim_point(&input, distance_feet),
        strength_percent: strength_percent(&input, distance_feet),
        trajectory: trajectory(&input, distance_feet, samples),
        success_probability: success_probability(&input, distance_feet),
        distance_feet,
    };

    log::debug!(
        "Putt {:.1} ft: strength={:.1}% aim=({:.2}, {:.2}) p={:.2}",
        distance_feet,
        outcome.strength_percent,
        outcome.aim_point.x,
        outcome.aim_point.y,
        outcome.success_probability
    );

    outcome
}

/// Aim offset from the hole. Faster greens carry the break further.
pub fn aim_point(input: &PuttInput, distance_feet: f32) -> Vec2 {
    let speed_factor = input.green_speed_stimp / REFERENCE_GREEN_SPEED;
    let break_effect = (input.break_percent / 100.0) * distance_feet * speed_factor;
    let dir = input.break_direction_rad();

    Vec2::new(
        dir.sin() * break_effect * AIM_LATERAL_FACTOR,
        dir.cos() * break_effect * AIM_DEPTH_FACTOR,
    )
}

/// Stroke strength in percent, clamped to [50, 150]
pub fn strength_percent(input: &PuttInput, distance_feet: f32) -> f32 {
    let mut strength = BASE_STRENGTH;
    strength += input.slope_percent * SLOPE_STRENGTH_FACTOR;
    strength += (REFERENCE_GREEN_SPEED - input.green_speed_stimp) * GREEN_SPEED_STRENGTH_FACTOR;
    strength += ((distance_feet - FRICTION_FREE_DISTANCE_FEET) * FRICTION_STRENGTH_PER_FOOT).max(0.0);
    strength *= input.putting_style.strength_factor();

    crate::finite_or(strength, STRENGTH_RANGE.1).clamp(STRENGTH_RANGE.0, STRENGTH_RANGE.1)
}

/// Sampled ball path with `samples` segments (`samples + 1` points, t = 0..=1).
///
/// Lateral drift grows with t²: the break acts longer as the ball slows.
pub fn trajectory(input: &PuttInput, distance_feet: f32, samples: usize) -> Vec<TrajectoryPoint> {
    let samples = samples.max(1);
    let total_break = (input.break_percent / 100.0) * distance_feet;
    let lateral = input.break_direction_rad().sin() * total_break;

    (0..=samples)
        .map(|i| {
            let t = i as f32 / samples as f32;
            TrajectoryPoint {
                x: lateral * t * t,
                y: t * distance_feet,
                t,
            }
        })
        .collect()
}

/// Chance of holing the putt, clamped to [0.05, 0.98]
pub fn success_probability(input: &PuttInput, distance_feet: f32) -> f32 {
    let mut probability = (1.0 - distance_feet / PROBABILITY_DISTANCE_SCALE_FEET).max(0.1);

    let slope_penalty = (1.0 - input.slope_percent.abs() / 100.0).max(0.3);
    let break_penalty = (1.0 - input.break_percent / 200.0).max(0.4);
    // Too fast or too slow both hurt
    let speed_penalty = (1.0 - (input.green_speed_stimp - REFERENCE_GREEN_SPEED).abs() / 20.0).max(0.5);

    probability *= slope_penalty * break_penalty * speed_penalty;
    probability *= input.putting_style.success_factor();
    probability *= PROBABILITY_DERATING;

    crate::finite_or(probability, PROBABILITY_RANGE.0).clamp(PROBABILITY_RANGE.0, PROBABILITY_RANGE.1)
}
