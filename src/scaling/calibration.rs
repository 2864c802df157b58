//! Calibration tables for the averaged-ratio strategy
//!
//! A calibration table lists how many render units a given real distance
//! should span. Averaging the per-point ratios gives one global
//! units-per-yard constant. A table is only accepted when that constant and
//! the banded scale agree within 10% at every point.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::engine::BandedScale;
use crate::units::yards_to_feet;

/// Largest allowed relative disagreement between the two strategies
pub const MAX_STRATEGY_DEVIATION: f32 = 0.10;

/// "N yards should look like M render units"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationPoint {
    pub distance_yards: f32,
    pub world_units: f32,
}

impl CalibrationPoint {
    pub const fn new(distance_yards: f32, world_units: f32) -> Self {
        Self {
            distance_yards,
            world_units,
        }
    }

    fn ratio(&self) -> f32 {
        self.world_units / self.distance_yards
    }

    /// Render units the banded scale gives this distance
    pub fn banded_units(&self) -> f32 {
        let feet = yards_to_feet(self.distance_yards);
        feet * BandedScale::units_per_foot(feet)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    #[error("calibration table has no points")]
    Empty,
    #[error("calibration point {index} needs a positive distance and finite units")]
    InvalidPoint { index: usize },
    #[error(
        "banded scale ({banded:.2}) and averaged ratio ({averaged:.2}) disagree by more than 10% at {distance_yards} yd"
    )]
    Inconsistent {
        distance_yards: f32,
        banded: f32,
        averaged: f32,
    },
}

/// Reference putting distances, all inside the first band
const SHORT_GAME: [CalibrationPoint; 3] = [
    CalibrationPoint::new(1.0, 3.0),
    CalibrationPoint::new(2.0, 6.1),
    CalibrationPoint::new(3.0, 8.9),
];

/// Reference approach distances, all past the last band
const LONG_GAME: [CalibrationPoint; 4] = [
    CalibrationPoint::new(50.0, 38.0),
    CalibrationPoint::new(150.0, 112.0),
    CalibrationPoint::new(250.0, 188.0),
    CalibrationPoint::new(300.0, 225.0),
];

/// A validated calibration table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    points: Vec<CalibrationPoint>,
    units_per_yard: f32,
}

impl Calibration {
    /// Validate `points` and compute their averaged ratio
    pub fn new(points: Vec<CalibrationPoint>) -> Result<Self, CalibrationError> {
        if points.is_empty() {
            return Err(CalibrationError::Empty);
        }
        if let Some(index) = points.iter().position(|p| {
            !(p.distance_yards.is_finite() && p.distance_yards > 0.0 && p.world_units.is_finite())
        }) {
            return Err(CalibrationError::InvalidPoint { index });
        }

        let calibration = Self::averaged(points);
        calibration.check_consistency()?;
        Ok(calibration)
    }

    /// Putting-green table
    pub fn short_game() -> Self {
        Self::averaged(SHORT_GAME.to_vec())
    }

    /// Full-hole table for swing views
    pub fn long_game() -> Self {
        Self::averaged(LONG_GAME.to_vec())
    }

    fn averaged(points: Vec<CalibrationPoint>) -> Self {
        let units_per_yard = points.iter().map(CalibrationPoint::ratio).sum::<f32>() / points.len() as f32;
        Self {
            points,
            units_per_yard,
        }
    }

    /// Mean of world units per yard across all points
    pub fn units_per_yard(&self) -> f32 {
        self.units_per_yard
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    /// Render units the averaged ratio gives `distance_yards`
    pub fn averaged_units(&self, distance_yards: f32) -> f32 {
        distance_yards * self.units_per_yard
    }

    /// Largest relative disagreement between the strategies over all points
    pub fn max_deviation(&self) -> f32 {
        self.points
            .iter()
            .map(|p| relative_deviation(p.banded_units(), self.averaged_units(p.distance_yards)))
            .fold(0.0, f32::max)
    }

    fn check_consistency(&self) -> Result<(), CalibrationError> {
        for point in &self.points {
            let banded = point.banded_units();
            let averaged = self.averaged_units(point.distance_yards);
            if relative_deviation(banded, averaged) > MAX_STRATEGY_DEVIATION {
                log::warn!(
                    "Calibration rejected at {} yd: banded={:.2} averaged={:.2}",
                    point.distance_yards,
                    banded,
                    averaged
                );
                return Err(CalibrationError::Inconsistent {
                    distance_yards: point.distance_yards,
                    banded,
                    averaged,
                });
            }
        }
        Ok(())
    }
}

fn relative_deviation(reference: f32, other: f32) -> f32 {
    if reference == 0.0 {
        if other == 0.0 { 0.0 } else { f32::INFINITY }
    } else {
        ((other - reference) / reference).abs()
    }
}
