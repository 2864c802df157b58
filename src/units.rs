//! Distance unit conversion
//!
//! Feet are the canonical unit; every conversion routes through them.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PACE_LENGTH_FEET, FEET_PER_YARD, PUTT_MODE_THRESHOLD_YARDS};

/// Units a player can enter a distance in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DistanceUnit {
    #[default]
    Feet,
    Yards,
    Paces,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Feet => "feet",
            DistanceUnit::Yards => "yards",
            DistanceUnit::Paces => "paces",
        }
    }

    /// Short HUD label
    pub fn abbreviation(&self) -> &'static str {
        match self {
            DistanceUnit::Feet => "ft",
            DistanceUnit::Yards => "yd",
            DistanceUnit::Paces => "paces",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "feet" | "foot" | "ft" => Some(DistanceUnit::Feet),
            "yards" | "yard" | "yd" | "yds" => Some(DistanceUnit::Yards),
            "paces" | "pace" => Some(DistanceUnit::Paces),
            _ => None,
        }
    }

    /// Length of one unit in feet
    pub fn feet_per_unit(&self, pace_length_feet: f32) -> f32 {
        match self {
            DistanceUnit::Feet => 1.0,
            DistanceUnit::Yards => FEET_PER_YARD,
            DistanceUnit::Paces => sanitize_pace_length(pace_length_feet),
        }
    }
}

/// Pace length falls back to the default when non-positive or non-finite
#[inline]
pub fn sanitize_pace_length(pace_length_feet: f32) -> f32 {
    if pace_length_feet.is_finite() && pace_length_feet > 0.0 {
        pace_length_feet
    } else {
        DEFAULT_PACE_LENGTH_FEET
    }
}

/// Convert `value` between units, routing through feet
pub fn convert(value: f32, from: DistanceUnit, to: DistanceUnit, pace_length_feet: f32) -> f32 {
    if from == to {
        return value;
    }
    let feet = value * from.feet_per_unit(pace_length_feet);
    feet / to.feet_per_unit(pace_length_feet)
}

/// Convert with the default 3 ft pace
#[inline]
pub fn convert_default(value: f32, from: DistanceUnit, to: DistanceUnit) -> f32 {
    convert(value, from, to, DEFAULT_PACE_LENGTH_FEET)
}

#[inline]
pub fn feet_to_yards(feet: f32) -> f32 {
    feet / FEET_PER_YARD
}

#[inline]
pub fn yards_to_feet(yards: f32) -> f32 {
    yards * FEET_PER_YARD
}

/// A distance tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distance {
    pub value: f32,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn new(value: f32, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }

    pub fn feet(value: f32) -> Self {
        Self::new(value, DistanceUnit::Feet)
    }

    pub fn yards(value: f32) -> Self {
        Self::new(value, DistanceUnit::Yards)
    }

    pub fn to_feet(&self, pace_length_feet: f32) -> f32 {
        convert(self.value, self.unit, DistanceUnit::Feet, pace_length_feet)
    }

    pub fn to_unit(&self, unit: DistanceUnit, pace_length_feet: f32) -> Self {
        Self::new(convert(self.value, self.unit, unit, pace_length_feet), unit)
    }
}

/// Format a remaining distance for the HUD.
///
/// Short distances (on the green) read in feet, everything else in yards.
pub fn format_distance(yards: f32) -> String {
    let yards = if yards.is_finite() { yards.abs() } else { 0.0 };
    if yards < PUTT_MODE_THRESHOLD_YARDS {
        format!("{:.0} {}", yards_to_feet(yards), DistanceUnit::Feet.abbreviation())
    } else {
        format!("{:.0} {}", yards, DistanceUnit::Yards.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_yards_to_feet() {
        assert_eq!(convert_default(10.0, DistanceUnit::Yards, DistanceUnit::Feet), 30.0);
        assert_eq!(convert_default(30.0, DistanceUnit::Feet, DistanceUnit::Yards), 10.0);
    }

    #[test]
    fn test_paces_use_configured_length() {
        assert_eq!(convert(4.0, DistanceUnit::Paces, DistanceUnit::Feet, 2.5), 10.0);
        assert_eq!(convert(4.0, DistanceUnit::Paces, DistanceUnit::Feet, 3.0), 12.0);
        // 3 ft paces are exactly one yard each
        assert_eq!(convert(5.0, DistanceUnit::Paces, DistanceUnit::Yards, 3.0), 5.0);
    }

    #[test]
    fn test_bad_pace_length_falls_back() {
        assert_eq!(convert(2.0, DistanceUnit::Paces, DistanceUnit::Feet, 0.0), 6.0);
        assert_eq!(convert(2.0, DistanceUnit::Paces, DistanceUnit::Feet, f32::NAN), 6.0);
        assert_eq!(convert(2.0, DistanceUnit::Paces, DistanceUnit::Feet, -4.0), 6.0);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!(DistanceUnit::from_str("ft"), Some(DistanceUnit::Feet));
        assert_eq!(DistanceUnit::from_str(" Yards "), Some(DistanceUnit::Yards));
        assert_eq!(DistanceUnit::from_str("pace"), Some(DistanceUnit::Paces));
        assert_eq!(DistanceUnit::from_str("meters"), None);
        for unit in [DistanceUnit::Feet, DistanceUnit::Yards, DistanceUnit::Paces] {
            assert_eq!(DistanceUnit::from_str(unit.as_str()), Some(unit));
        }
    }

    #[test]
    fn test_distance_value_type() {
        let d = Distance::yards(4.0);
        assert_eq!(d.to_feet(3.0), 12.0);
        let paces = d.to_unit(DistanceUnit::Paces, 2.0);
        assert_eq!(paces.unit, DistanceUnit::Paces);
        assert_eq!(paces.value, 6.0);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(5.0), "15 ft");
        assert_eq!(format_distance(150.0), "150 yd");
        assert_eq!(format_distance(f32::NAN), "0 ft");
    }

    proptest! {
        /// Property: feet -> yards -> feet returns the original value
        #[test]
        fn prop_feet_yards_round_trip(x in -10_000.0f32..10_000.0f32) {
            let yards = convert_default(x, DistanceUnit::Feet, DistanceUnit::Yards);
            let back = convert_default(yards, DistanceUnit::Yards, DistanceUnit::Feet);
            prop_assert!((back - x).abs() <= 1e-4 * x.abs().max(1.0));
        }

        /// Property: paces round-trip for any fixed pace length
        #[test]
        fn prop_paces_round_trip(x in 0.0f32..1_000.0f32, pace in 1.0f32..5.0f32) {
            let feet = convert(x, DistanceUnit::Paces, DistanceUnit::Feet, pace);
            let back = convert(feet, DistanceUnit::Feet, DistanceUnit::Paces, pace);
            prop_assert!((back - x).abs() <= 1e-4 * x.abs().max(1.0));
        }
    }
}
