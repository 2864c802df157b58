//! Putt parameters as entered by the player

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::units::{DistanceUnit, convert};
use crate::{finite_or, normalize_degrees};

/// Stroke style chosen by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PuttingStyle {
    #[default]
    Straight,
    SlightArc,
    StrongArc,
}

impl PuttingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PuttingStyle::Straight => "straight",
            PuttingStyle::SlightArc => "slight-arc",
            PuttingStyle::StrongArc => "strong-arc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "straight" => Some(PuttingStyle::Straight),
            "slight-arc" | "slight" => Some(PuttingStyle::SlightArc),
            "strong-arc" | "strong" => Some(PuttingStyle::StrongArc),
            _ => None,
        }
    }

    /// Multiplier applied to the stroke strength
    pub fn strength_factor(&self) -> f32 {
        match self {
            PuttingStyle::Straight => 1.0,
            PuttingStyle::SlightArc => 1.02,
            PuttingStyle::StrongArc => 0.98,
        }
    }

    /// Multiplier applied to the success probability
    pub fn success_factor(&self) -> f32 {
        match self {
            PuttingStyle::Straight => 1.0,
            PuttingStyle::SlightArc => 1.05,
            PuttingStyle::StrongArc => 0.95,
        }
    }
}

/// One snapshot of the putt controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuttInput {
    /// Distance to the hole in `distance_unit`
    pub distance: f32,
    pub distance_unit: DistanceUnit,
    /// Positive is uphill
    pub slope_percent: f32,
    pub break_percent: f32,
    /// Direction the putt breaks toward (degrees, 0 = toward the hole)
    pub break_direction_deg: f32,
    /// Green speed on the stimpmeter
    pub green_speed_stimp: f32,
    pub putting_style: PuttingStyle,
    /// Stride length used when `distance_unit` is paces
    #[serde(default = "default_pace_length")]
    pub pace_length_feet: f32,
}

fn default_pace_length() -> f32 {
    DEFAULT_PACE_LENGTH_FEET
}

impl Default for PuttInput {
    fn default() -> Self {
        Self {
            distance: 10.0,
            distance_unit: DistanceUnit::Feet,
            slope_percent: 0.0,
            break_percent: 0.0,
            break_direction_deg: 0.0,
            green_speed_stimp: REFERENCE_GREEN_SPEED,
            putting_style: PuttingStyle::Straight,
            pace_length_feet: DEFAULT_PACE_LENGTH_FEET,
        }
    }
}

impl PuttInput {
    /// Distance converted to feet, saturated to [0, MAX_DISTANCE_FEET].
    /// NaN counts as zero; overflowing or infinite distances count as the max.
    pub fn distance_feet(&self) -> f32 {
        let feet = convert(
            saturate_distance(self.distance, f32::MAX),
            self.distance_unit,
            DistanceUnit::Feet,
            crate::units::sanitize_pace_length(self.pace_length_feet),
        );
        saturate_distance(feet, MAX_DISTANCE_FEET)
    }

    /// Copy with every field pulled into its documented range
    pub fn clamped(&self) -> Self {
        Self {
            distance: saturate_distance(self.distance, f32::MAX),
            distance_unit: self.distance_unit,
            slope_percent: finite_or(self.slope_percent, 0.0)
                .clamp(SLOPE_PERCENT_RANGE.0, SLOPE_PERCENT_RANGE.1),
            break_percent: finite_or(self.break_percent, 0.0)
                .clamp(BREAK_PERCENT_RANGE.0, BREAK_PERCENT_RANGE.1),
            break_direction_deg: normalize_degrees(finite_or(self.break_direction_deg, 0.0)),
            green_speed_stimp: finite_or(self.green_speed_stimp, REFERENCE_GREEN_SPEED)
                .clamp(GREEN_SPEED_RANGE.0, GREEN_SPEED_RANGE.1),
            putting_style: self.putting_style,
            pace_length_feet: crate::units::sanitize_pace_length(self.pace_length_feet),
        }
    }

    /// Break direction in radians
    pub fn break_direction_rad(&self) -> f32 {
        self.break_direction_deg.to_radians()
    }
}

fn saturate_distance(value: f32, max: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, max) }
}
